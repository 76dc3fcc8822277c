//! This crate contains the FrameSpell dashboard UI: the components, and the
//! framework-independent controllers they drive.
//!
//! The controllers (`session`, `dashboard`, `keys`, `demo`, `oauth`, `plan`,
//! `payment`, `tester`, `toast`, `view_model`) are generic over
//! [`api::Backend`] and a [`session::SessionHandle`] and are tested without a
//! browser. Components reach them through the [`FrameSpell`] context.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::{FaGithub, FaGoogle};
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod browser;
pub mod clipboard;
pub mod dashboard;
pub mod demo;
pub mod keys;
pub mod loading;
pub mod navigation;
pub mod oauth;
pub mod payment;
pub mod plan;
pub mod registry;
pub mod session;
pub mod tester;
pub mod timer;
pub mod toast;
pub mod validation;
pub mod view_model;

#[cfg(test)]
mod testing;

mod app;
pub use app::{use_frame_spell, FrameSpell, FrameSpellProvider, Modal};
pub use navigation::AppPage;

mod auth;
pub use auth::AuthModal;

mod navbar;
pub use navbar::Navbar;

mod toast_container;
pub use toast_container::ToastContainer;

pub mod views;

pub use dashboard::{DashboardController, DashboardPage, DashboardState};
pub use validation::ValidationError;
