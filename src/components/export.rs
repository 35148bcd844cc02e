use wasm_bindgen::prelude::*;
use web_sys::{HtmlAnchorElement, HtmlCanvasElement};

/// Saves the canvas as a PNG through a temporary download link.
pub fn download_png(canvas: &HtmlCanvasElement, file_name: &str) -> Result<(), JsValue> {
	let url = canvas.to_data_url_with_type("image/png")?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let link: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(JsValue::from)?;
	link.set_href(&url);
	link.set_download(file_name);
	link.click();
	Ok(())
}
