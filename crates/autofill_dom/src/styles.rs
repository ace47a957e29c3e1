//! Class names, element ids, and the injected stylesheet.

/// Id of the injected `<style>` element; also the idempotence marker.
pub const STYLE_ID: &str = "fpa-style";
/// Class of the in-form trigger button.
pub const TRIGGER_CLASS: &str = "fpa-trigger";
/// Id of the full-page status overlay.
pub const OVERLAY_ID: &str = "fpa-overlay";
/// Indicator class while the auth request is in flight.
pub const SPINNER_CLASS: &str = "fpa-spinner";
/// Indicator class after a granted auth reply.
pub const CHECK_CLASS: &str = "fpa-check";
/// Indicator class after a denied auth reply.
pub const CROSS_CLASS: &str = "fpa-cross";

/// Stylesheet injected once per page. Overlay and indicator are fixed,
/// centered, and stacked above page content.
pub(crate) const STYLESHEET: &str = "\
.fpa-trigger {\
  display: block;\
  margin: 6px 0;\
  padding: 6px 12px;\
  border: 1px solid #2d6cdf;\
  border-radius: 4px;\
  background: #2d6cdf;\
  color: #fff;\
  cursor: pointer;\
}\
#fpa-overlay {\
  position: fixed;\
  top: 0;\
  left: 0;\
  width: 100%;\
  height: 100%;\
  background: rgba(0, 0, 0, 0.45);\
  z-index: 2147483647;\
}\
.fpa-spinner, .fpa-check, .fpa-cross {\
  position: fixed;\
  top: 50%;\
  left: 50%;\
  width: 64px;\
  height: 64px;\
  margin: -32px 0 0 -32px;\
  border-radius: 50%;\
}\
.fpa-spinner {\
  border: 6px solid #eee;\
  border-top-color: #2d6cdf;\
  animation: fpa-spin 0.8s linear infinite;\
}\
.fpa-check { background: #2eae60; }\
.fpa-cross { background: #d64545; }\
@keyframes fpa-spin {\
  to { transform: rotate(360deg); }\
}";
