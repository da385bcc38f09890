//! UI primitives (Button, Card, Skeleton)

pub mod button;
pub mod card;
pub mod skeleton;

pub use button::*;
pub use card::*;
pub use skeleton::*;
