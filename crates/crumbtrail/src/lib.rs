#![doc = include_str!("../README.md")]

mod ancestors;
mod breadcrumb;
mod builders;
mod classify;
mod config;
mod crumb;
mod hooks;
pub mod host;
pub mod html;
pub mod memory;
mod permalink;
mod render;
mod trail;

pub use ancestors::*;
pub use breadcrumb::*;
pub use builders::*;
pub use classify::*;
pub use config::*;
pub use crumb::*;
pub use hooks::*;
pub use permalink::*;
pub use render::*;
pub use trail::*;
