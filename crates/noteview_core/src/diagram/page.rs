//! Host page embedding the diagram editor.
//!
//! The page stretches the editor frame over the whole viewport and carries
//! the diagram payload as a base64 literal. When the host exposes its
//! message channel (`window.noteviewHost`) every editor message is relayed
//! to it and the host answers through `window.deliverCommand`. Without a
//! channel the page serves `init` and `save` itself so an exported page
//! still shows the diagram.

use crate::diagram::protocol::{OutboundCommand, ProtocolError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

const FRAME_STYLE: &str = "position:fixed; top:0; left:0; bottom:0; right:0; width:100%; \
height:100%; border:none; margin:0; padding:0; overflow:hidden; z-index:999999;";

/// Page variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Opened from the editor: editable, with an exit button.
    Live,
    /// Plain note view: lightbox, no exit button.
    View,
}

impl PageMode {
    pub fn allows_exit(self) -> bool {
        matches!(self, Self::Live)
    }

    fn editor_query(self) -> &'static str {
        match self {
            Self::Live => "embed=1&ui=dark&spin=0&proto=json",
            Self::View => "embed=1&lightbox=1&ui=dark&spin=0&proto=json&noExitBtn=1",
        }
    }
}

/// Base64 form of `payload` as embedded in the page.
pub fn encode_payload(payload: &str) -> String {
    STANDARD.encode(payload.as_bytes())
}

/// Builds the host page for `payload`.
pub fn diagram_page(
    payload: &str,
    mode: PageMode,
    editor_url: &str,
) -> Result<String, ProtocolError> {
    let export_command = script_string(&OutboundCommand::export_xmlpng().to_json()?)?;
    let encoded = encode_payload(payload);
    let separator = if editor_url.contains('?') { '&' } else { '?' };

    let mut page = String::with_capacity(2048 + encoded.len());
    page.push_str("<!DOCTYPE html>\n<html>\n<body>\n");
    page.push_str(&format!(
        "<iframe src='{editor_url}{separator}{}' style='{FRAME_STYLE}'></iframe>\n",
        mode.editor_query()
    ));
    page.push_str("<script>\n");
    page.push_str(&format!("var xmlData = decodePayload('{encoded}');\n"));
    page.push_str(&format!("var exportCommand = {export_command};\n"));
    page.push_str(
        "function decodePayload(encoded) {\n\
         \x20 var bytes = Uint8Array.from(atob(encoded), function (c) { return c.charCodeAt(0); });\n\
         \x20 return new TextDecoder().decode(bytes);\n\
         }\n\
         var host = window.noteviewHost || null;\n\
         var frame = document.querySelector('iframe');\n\
         var editor = frame.contentWindow;\n\
         window.deliverCommand = function (json) { editor.postMessage(json, '*'); };\n\
         window.onbeforeunload = function () { frame.parentNode.removeChild(frame); };\n\
         window.addEventListener('message', function (evt) {\n\
         \x20 if (evt.source !== editor || !evt.data || evt.data.length === 0) { return; }\n\
         \x20 if (host) { host.receiveMessage(evt.data); return; }\n\
         \x20 var msg = JSON.parse(evt.data);\n\
         \x20 if (msg.event === 'init') {\n\
         \x20   editor.postMessage(JSON.stringify({action: 'load', xmlpng: xmlData}), '*');\n\
         \x20 } else if (msg.event === 'save') {\n\
         \x20   editor.postMessage(exportCommand, '*');\n\
         \x20 } else if (msg.event === 'export') {\n\
         \x20   xmlData = msg.data;\n\
         \x20 }\n\
         });\n",
    );
    page.push_str("</script>\n</body>\n</html>\n");
    Ok(page)
}

/// JSON string literal that is also safe inside a `<script>` element.
fn script_string(value: &str) -> Result<String, ProtocolError> {
    let literal = serde_json::to_string(value).map_err(ProtocolError::Encode)?;
    Ok(literal.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::{diagram_page, encode_payload, script_string, PageMode};

    const URL: &str = "qrc:///drawio/webapp/index.html";

    #[test]
    fn view_page_is_lightbox_without_exit() {
        let page = diagram_page("<x/>", PageMode::View, URL).unwrap();
        assert!(page.contains("lightbox=1"));
        assert!(page.contains("noExitBtn=1"));
        assert!(page.contains(&format!("decodePayload('{}')", encode_payload("<x/>"))));
    }

    #[test]
    fn live_page_keeps_exit_button() {
        let page = diagram_page("<x/>", PageMode::Live, URL).unwrap();
        assert!(!page.contains("lightbox=1"));
        assert!(!page.contains("noExitBtn"));
        assert!(page.contains(&format!("{URL}?embed=1")));
    }

    #[test]
    fn editor_url_with_query_is_extended() {
        let page = diagram_page("", PageMode::Live, "https://draw/?offline=1").unwrap();
        assert!(page.contains("https://draw/?offline=1&embed=1"));
    }

    #[test]
    fn script_strings_cannot_close_the_script_element() {
        let literal = script_string("</script><b>").unwrap();
        assert!(!literal.contains("</"));
    }
}
