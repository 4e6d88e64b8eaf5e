use crate::bounds::BoundingBox;
use crate::polygon::Polygon;
use crate::voronoi::{Voronoi, random_points};
use js_sys::Array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_BOUNDS: &'static str = r#"
export const BOX_ID_LEFT = -1;
export const BOX_ID_RIGHT = -2;
export const BOX_ID_BOTTOM = -3;
export const BOX_ID_TOP = -4;
"#;

pub fn parse_js_point(val: &JsValue) -> Option<[f64; 2]> {
    let arr = val.dyn_ref::<Array>()?;
    if arr.length() < 2 {
        return None;
    }
    Some([arr.get(0).as_f64()?, arr.get(1).as_f64()?])
}

fn parse_js_points(val: &JsValue) -> Result<Vec<[f64; 2]>, JsValue> {
    let arr = val
        .dyn_ref::<Array>()
        .ok_or_else(|| JsValue::from_str("Expected an array of [x, y] points"))?;
    arr.iter()
        .enumerate()
        .map(|(i, item)| {
            parse_js_point(&item).ok_or_else(|| JsValue::from_str(&format!("Invalid point at index {}", i)))
        })
        .collect()
}

fn unflatten(points: &[f64]) -> Vec<[f64; 2]> {
    points.chunks_exact(2).map(|p| [p[0], p[1]]).collect()
}

fn to_js_error(e: crate::error::VoronoiError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}

// --- Polygon Wrapper ---

#[wasm_bindgen(js_name = Polygon2D)]
pub struct Polygon2D {
    inner: Polygon,
}

#[wasm_bindgen(js_class = Polygon2D)]
impl Polygon2D {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> usize { self.inner.id() }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> { self.inner.vertices() }
    #[wasm_bindgen(getter)]
    pub fn edge_neighbors(&self) -> Vec<i32> { self.inner.edge_neighbors() }
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
    pub fn area(&self) -> f64 { self.inner.area() }
    pub fn centroid(&self) -> Option<Vec<f64>> { self.inner.centroid().map(|c| c.to_vec()) }
    pub fn contains(&self, x: f64, y: f64) -> bool { self.inner.contains(x, y) }
}

// --- Voronoi ---

/// Voronoi layout over flat `[x0, y0, x1, y1, ...]` point buffers.
#[wasm_bindgen(js_name = Voronoi2D)]
pub struct Voronoi2D {
    inner: Voronoi<[f64; 2]>,
}

impl Default for Voronoi2D {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = Voronoi2D)]
impl Voronoi2D {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Voronoi2D {
        Voronoi2D { inner: Voronoi::new() }
    }

    pub fn set_extent(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<(), JsValue> {
        self.inner.set_extent([min_x, min_y], [max_x, max_y]).map_err(to_js_error)
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner.set_size([width, height]).map_err(to_js_error)
    }

    pub fn clear_extent(&mut self) { self.inner.clear_extent(); }

    /// `[min_x, min_y, max_x, max_y]`, or undefined when no extent is set.
    #[wasm_bindgen(getter)]
    pub fn extent(&self) -> Option<Vec<f64>> {
        self.inner.extent().map(|e| vec![e.min[0], e.min[1], e.max[0], e.max[1]])
    }

    pub fn polygons(&self, points: &[f64]) -> Result<Vec<Polygon2D>, JsValue> {
        let polygons = self.inner.polygons(&unflatten(points)).map_err(to_js_error)?;
        Ok(polygons.into_iter().map(|inner| Polygon2D { inner }).collect())
    }

    #[wasm_bindgen(js_name = polygonsFromArray)]
    pub fn polygons_from_array(&self, points: &JsValue) -> Result<Vec<Polygon2D>, JsValue> {
        let polygons = self.inner.polygons(&parse_js_points(points)?).map_err(to_js_error)?;
        Ok(polygons.into_iter().map(|inner| Polygon2D { inner }).collect())
    }

    /// Delaunay links as flat `[source, target, ...]` index pairs.
    pub fn links(&self, points: &[f64]) -> Result<Vec<u32>, JsValue> {
        let links = self.inner.links(&unflatten(points)).map_err(to_js_error)?;
        Ok(links.iter().flat_map(|l| [l.source as u32, l.target as u32]).collect())
    }

    /// Delaunay triangles as flat index triples.
    pub fn triangles(&self, points: &[f64]) -> Result<Vec<u32>, JsValue> {
        let triangles = self.inner.triangles(&unflatten(points)).map_err(to_js_error)?;
        Ok(triangles.iter().flat_map(|t| t.map(|i| i as u32)).collect())
    }

    pub fn relax(&self, points: &[f64], iterations: usize) -> Result<Vec<f64>, JsValue> {
        let relaxed = self.inner.relax(&unflatten(points), iterations).map_err(to_js_error)?;
        Ok(relaxed.into_iter().flatten().collect())
    }

    /// Uniform random points inside the extent, flattened.
    pub fn random_points(&self, count: usize) -> Vec<f64> {
        let bounds = self.inner.extent().unwrap_or_else(BoundingBox::null);
        let mut rng = StdRng::seed_from_u64(get_seed());
        random_points(&bounds, count, &mut rng).into_iter().flatten().collect()
    }
}
