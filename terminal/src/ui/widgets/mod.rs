//! # Reusable UI Widgets
//!
//! Common widgets used across screens.

pub mod forms;
pub mod nav_bar;
pub mod notifications;
pub mod price_widget;
pub mod stats_cards;
pub mod status_bar;
pub mod tables;
pub mod trade_form;
pub mod wallet_card;
