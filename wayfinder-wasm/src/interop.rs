//! Column views of the graph as typed arrays, for canvas layers that draw
//! straight from buffers instead of walking objects.

use js_sys::{Float64Array, Object, Reflect, Uint32Array, Uint8Array};
use wasm_bindgen::JsValue;
use wayfinder::GraphStore;

/// Plain JS object from key/value pairs.
pub fn object(entries: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (k, v) in entries {
        let _ = Reflect::set(&obj, &JsValue::from_str(k), v);
    }
    obj.into()
}

pub fn id_array(ids: &[u32]) -> JsValue {
    Uint32Array::from(ids).into()
}

/// `{ ids, positions: [lat0, lng0, lat1, ...], waypoint }`
pub fn node_columns(g: &GraphStore) -> JsValue {
    let n = g.node_count();
    let mut ids = Vec::with_capacity(n);
    let mut positions = Vec::with_capacity(n * 2);
    let mut waypoint = Vec::with_capacity(n);
    for node in g.nodes() {
        ids.push(node.id);
        positions.extend_from_slice(&[node.position.lat, node.position.lng]);
        waypoint.push(node.is_waypoint as u8);
    }
    object(&[
        ("ids", id_array(&ids)),
        ("positions", Float64Array::from(&positions[..]).into()),
        ("waypoint", Uint8Array::from(&waypoint[..]).into()),
    ])
}

/// `{ ids, endpoints: [a0, b0, a1, ...], distances, obstructed, clearance }`
pub fn edge_columns(g: &GraphStore) -> JsValue {
    let n = g.edge_count();
    let mut ids = Vec::with_capacity(n);
    let mut endpoints = Vec::with_capacity(n * 2);
    let mut distances = Vec::with_capacity(n);
    let mut obstructed = Vec::with_capacity(n);
    let mut clearance = Vec::with_capacity(n);
    for e in g.edges() {
        ids.push(e.id);
        endpoints.extend_from_slice(&[e.node_a, e.node_b]);
        distances.push(e.distance);
        obstructed.push(e.is_obstructed as u8);
        clearance.push(e.clearance.level());
    }
    object(&[
        ("ids", id_array(&ids)),
        ("endpoints", id_array(&endpoints)),
        ("distances", Float64Array::from(&distances[..]).into()),
        ("obstructed", Uint8Array::from(&obstructed[..]).into()),
        ("clearance", Uint8Array::from(&clearance[..]).into()),
    ])
}
