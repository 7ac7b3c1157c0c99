pub use display::{Display, LIT, UNLIT};

mod display;
