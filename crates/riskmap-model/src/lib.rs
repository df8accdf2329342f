pub mod expansion;
pub mod metrics;
pub mod style;
pub mod transform;
pub mod validate;

pub use expansion::{extract, stamp, toggle};
pub use metrics::{TreeMetrics, summarize};
pub use style::{
    Color, GradientVariant, NodeColors, NodeDimensions, NodeState, NodeStyle, gradient_id,
    node_colors, node_dimensions, node_style, text_color,
};
pub use transform::{TransformOptions, TreeTransformer, conformity};
pub use validate::{ValidationReport, validate};
