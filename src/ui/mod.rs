/// UI layer: filter widgets (left panel, top bar) and chart rendering.

pub mod charts;
pub mod panels;
