//! # Screen Modules
//!
//! Each screen module contains the rendering logic for one screen of the
//! application.
//!
//! - **[`auth`]**: Sign in and account creation forms
//! - **[`dashboard`]**: Wallet card, trade statistics, order entry and live price
//! - **[`trades`]**: Trade history with close actions
//! - **[`wallet`]**: Balance, deposits, withdrawals and transaction history
//! - **[`notifications`]**: Inbox, price alerts and delivery settings
//! - **[`profile`]**: Account details, preferences and security
//! - **[`docs`]**: Bundled trading guides and tutorials
//!
//! ## Rendering Pattern
//!
//! ```rust,ignore
//! pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
//!     // Read from the snapshot, edit local copies of form buffers,
//!     // write changed buffers back and call app.handle_* for actions.
//! }
//! ```
//!
//! Screens receive a **cloned state snapshot**, so no lock is held while
//! widgets are laid out. User actions go through `App` methods which take the
//! lock briefly and spawn any network work.

pub mod auth;
pub mod dashboard;
pub mod docs;
pub mod notifications;
pub mod profile;
pub mod trades;
pub mod wallet;
