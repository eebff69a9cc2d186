use bingo_core::{BingoError, UrlAccess, query};
use wasm_bindgen::JsValue;

fn js_error(err: JsValue) -> BingoError {
    BingoError::Url(format!("{:?}", err))
}

/// Address bar of the current window.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct BrowserUrl;

impl BrowserUrl {
    /// Swaps the fragment, keeping path and query.
    pub(crate) fn replace_fragment(&mut self, fragment: &str) -> bingo_core::Result<()> {
        let href = query::replace_fragment(&self.href(), fragment)?;
        self.replace_href(&href)
    }

    pub(crate) fn fragment(&self) -> String {
        query::fragment(&self.href()).unwrap_or_default()
    }
}

impl UrlAccess for BrowserUrl {
    fn href(&self) -> String {
        gloo::utils::window()
            .location()
            .href()
            .unwrap_or_else(|err| {
                log::error!("failed to read location: {:?}", err);
                String::new()
            })
    }

    fn replace_href(&mut self, href: &str) -> bingo_core::Result<()> {
        let history = gloo::utils::window().history().map_err(js_error)?;
        history
            .replace_state_with_url(&JsValue::NULL, "", Some(href))
            .map_err(js_error)
    }
}
