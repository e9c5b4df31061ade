mod model;
mod output;
mod wasm;
pub mod layout;

pub use layout::{
    AxisLabelBox, ChartLayout, ItemPosition, LayoutConfig, LayoutRun, PolarBounds, RectF,
    StepOutcome,
};
pub use model::{HorizonItem, categories_of};
pub use output::{ChartOutput, ErrorInfo};
