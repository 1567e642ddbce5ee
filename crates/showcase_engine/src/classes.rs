//! Class names and ids shared with the stylesheet. Changing any of these
//! breaks the page's CSS.

pub const EMBED_CONTAINER: &str = "project-embed-container";
pub const EMBED_WRAPPER: &str = "project-embed-wrapper";
pub const EMBED_GRID: &str = "projects-embed-grid";

pub const BROWSER_CHROME: &str = "browser-chrome";
pub const BROWSER_DOTS: &str = "browser-dots";
pub const BROWSER_DOT: &str = "browser-dot";
pub const BROWSER_URL: &str = "browser-url";

pub const CONTENT_REGION: &str = "iframe-container";
pub const LOADING_OVERLAY: &str = "iframe-loading";
pub const LOADING_TEXT: &str = "iframe-loading-text";
pub const ERROR_OVERLAY: &str = "iframe-error";
pub const ERROR_MESSAGE: &str = "iframe-error-message";
pub const ERROR_LINK: &str = "iframe-error-link";

pub const INFO_PANEL: &str = "project-embed-info";
pub const INFO_TITLE: &str = "project-embed-title";
pub const INFO_DESCRIPTION: &str = "project-embed-description";
pub const INFO_LINK: &str = "project-embed-link";

pub const HIDDEN: &str = "hidden";
pub const VISIBLE: &str = "visible";
pub const STICKY: &str = "sticky";
pub const ACTIVE: &str = "active";

pub const NAV_ANCHOR_ID: &str = "nav-anchor";
pub const SETTINGS_SCRIPT_ID: &str = "showcase-settings";
pub const PROJECTS_SCRIPT_ID: &str = "showcase-projects";
pub const DEFAULT_PROJECTS_TARGET: &str = "#projects-embed";
