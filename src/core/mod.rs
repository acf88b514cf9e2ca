pub mod axis;
pub mod types;

pub use axis::{Axis, AxisMap, Orientation};
pub use types::{Margins, Point, Rect, Size};
