#![forbid(unsafe_code)]

//! Click, key, and form interactions.
//!
//! Each feature owns a small state machine in [`crate::PageContext`] and is
//! only wired when its elements exist on the page. Click reactions are
//! registered element-level first and document-level ("click outside")
//! last, matching the order in which a browser bubbles a click.

pub mod cards;
pub mod contact;
pub mod dropdown;
pub mod menu;
pub mod smooth_scroll;
pub mod theme;
