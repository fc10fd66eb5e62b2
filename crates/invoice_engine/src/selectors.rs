//! Static selector mapping for the billing portal.
//!
//! The portal has two navigable states: the invoice list and a single
//! invoice's detail surface. Row lookups are position-based
//! (`nth-child`), so a row selector is only meaningful on a freshly
//! loaded list view.

/// Login route, relative to the portal base URL.
pub const LOGIN_ROUTE: &str = "login";
/// Invoice list route, relative to the portal base URL.
pub const LIST_ROUTE: &str = "invoices";

pub const USERNAME_INPUT: &str = "input[name='username']";
pub const PASSWORD_INPUT: &str = "input[name='password']";
pub const COOKIE_ACCEPT: &str = "#cookie-consent button.accept";
pub const LOGIN_SUBMIT: &str = "form#login button[type='submit']";
/// Present only once the post-login landing page has rendered.
pub const LOGGED_IN_MARKER: &str = "nav a.logout";

pub const ROW_CONTAINER: &str = "table.invoice-list";
pub const ROW: &str = "table.invoice-list tbody tr";
pub const DETAIL_SURFACE: &str = "#invoice-detail";
pub const DOWNLOAD_TRIGGER: &str = "#invoice-detail a.download";

/// Name the portal gives every downloaded document before it is renamed.
pub const SOURCE_FILENAME: &str = "invoice.pdf";

/// Date cell of the 1-based `index`-th list row.
pub fn row_date_cell(index: usize) -> String {
    format!("{ROW}:nth-child({index}) td.issue-date")
}

/// Detail-view link of the 1-based `index`-th list row.
pub fn row_open_link(index: usize) -> String {
    format!("{ROW}:nth-child({index}) a.open")
}
