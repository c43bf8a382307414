use anyhow::anyhow;
use motion_core::Rect;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn html_element_by_id(document: &web::Document, element_id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow!("missing #{element_id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow!("#{element_id} is not an HTML element"))
}

/// Current layout box in viewport coordinates, matching `clientX/clientY`.
#[inline]
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// Descendants of `root` carrying `attr`, ordered by the attribute's integer
/// value when present and by document order otherwise.
pub fn tagged_children(root: &web::Element, attr: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = root.query_selector_all(&format!("[{attr}]")) else {
        return Vec::new();
    };
    let mut found: Vec<(usize, usize, web::HtmlElement)> = (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .enumerate()
        .map(|(doc_order, el)| {
            let index = el
                .get_attribute(attr)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(doc_order);
            (index, doc_order, el)
        })
        .collect();
    found.sort_by_key(|(index, doc_order, _)| (*index, *doc_order));
    found.into_iter().map(|(_, _, el)| el).collect()
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}
