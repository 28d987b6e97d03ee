//! Injected style sheets
//!
//! Rules the effects rely on but the page's own CSS does not ship. Each sheet
//! is injected at most once, keyed by its element id.

use folio_core::Document;

/// A `<style>` element injected into the document head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    pub id: &'static str,
    pub css: &'static str,
}

/// Overlay, page fade and loader rules
pub const TRANSITION_STYLES: StyleSheet = StyleSheet {
    id: "transition-styles",
    css: r#"
.page-transition-overlay {
    position: fixed;
    top: 0;
    left: 0;
    width: 100vw;
    height: 100vh;
    background: linear-gradient(135deg, #000000 0%, #111111 50%, #1a1a1a 100%);
    z-index: 9999;
    display: flex;
    align-items: center;
    justify-content: center;
    opacity: 0;
    visibility: hidden;
    transition: all 0.5s cubic-bezier(0.4, 0, 0.2, 1);
    backdrop-filter: blur(10px);
}
.page-transition-overlay.active {
    opacity: 1;
    visibility: visible;
}
.transition-content {
    text-align: center;
    color: white;
    transform: translateY(30px);
    transition: transform 0.5s ease;
}
.page-transition-overlay.active .transition-content {
    transform: translateY(0);
}
.transition-loader {
    position: relative;
    width: 80px;
    height: 80px;
    margin: 0 auto 20px;
}
.loader-ring {
    position: absolute;
    width: 100%;
    height: 100%;
    border: 2px solid transparent;
    border-top: 2px solid #ffffff;
    border-radius: 50%;
    animation: spin 1s linear infinite;
}
.loader-ring:nth-child(2) {
    width: 60px;
    height: 60px;
    top: 10px;
    left: 10px;
    animation-delay: -0.3s;
    border-top-color: #cccccc;
}
.loader-ring:nth-child(3) {
    width: 40px;
    height: 40px;
    top: 20px;
    left: 20px;
    animation-delay: -0.6s;
    border-top-color: #888888;
}
.transition-text {
    font-size: 1.2rem;
    font-weight: 300;
    opacity: 0.8;
    animation: pulse 2s ease-in-out infinite;
}
@keyframes spin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}
@keyframes pulse {
    0%, 100% { opacity: 0.8; }
    50% { opacity: 0.4; }
}
.page-fade-out {
    opacity: 0;
    transform: translateY(20px);
    transition: all 0.3s ease;
}
.page-fade-in {
    opacity: 1;
    transform: translateY(0);
    transition: all 0.3s ease;
}
.page-loader {
    position: fixed;
    top: 0;
    left: 0;
    width: 100vw;
    height: 100vh;
    background: #000000;
    z-index: 10000;
    display: flex;
    align-items: center;
    justify-content: center;
    flex-direction: column;
}
.page-loader.fade-out {
    opacity: 0;
    transition: opacity 0.5s ease;
}
.logo-animation {
    font-size: 3rem;
    font-weight: bold;
    color: #ffffff;
    margin-bottom: 2rem;
    animation: logoFadeIn 1s ease;
}
.progress-bar-container {
    width: 300px;
    height: 4px;
    background: #333;
    border-radius: 2px;
    overflow: hidden;
}
.progress-bar-fill {
    height: 100%;
    background: linear-gradient(90deg, #ffffff, #cccccc);
    width: 0%;
    transition: width 0.3s ease;
    border-radius: 2px;
}
@keyframes logoFadeIn {
    0% { opacity: 0; transform: scale(0.8); }
    100% { opacity: 1; transform: scale(1); }
}
"#,
};

/// Click ripple keyframes
pub const RIPPLE_STYLES: StyleSheet = StyleSheet {
    id: "ripple-styles",
    css: r#"
@keyframes ripple {
    to {
        transform: scale(4);
        opacity: 0;
    }
}
"#,
};

/// Mobile menu slide keyframes
pub const MOBILE_MENU_STYLES: StyleSheet = StyleSheet {
    id: "mobile-menu-styles",
    css: r#"
#mobile-menu-btn {
    transition: transform 0.3s ease;
}
@keyframes slideDown {
    from { opacity: 0; transform: translateY(-20px); }
    to { opacity: 1; transform: translateY(0); }
}
@keyframes slideUp {
    from { opacity: 1; transform: translateY(0); }
    to { opacity: 0; transform: translateY(-20px); }
}
"#,
};

/// Append `sheet` to the head unless an element with its id exists
///
/// Returns whether a new element was created.
pub fn inject<D: Document + ?Sized>(doc: &mut D, sheet: &StyleSheet) -> bool {
    if doc.element_by_id(sheet.id).is_some() {
        return false;
    }
    let style = doc.create_element("style");
    doc.set_attribute(style, "id", sheet.id);
    doc.set_text(style, sheet.css);
    let head = doc.head();
    doc.append_child(head, style);
    tracing::debug!("Injected style sheet {}", sheet.id);
    true
}
