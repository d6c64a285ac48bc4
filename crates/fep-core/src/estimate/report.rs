use super::{Direction, FepEstimate};
use crate::domain::WindowSet;
use bigdecimal::BigDecimal;
use serde::Serialize;

/// Serializable summary of one run: sample counts and estimates per window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub windows: Vec<WindowReport>,
    pub forward_total_kcal_mol: String,
    pub backward_total_kcal_mol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    pub window: String,
    pub before_samples: usize,
    pub this_samples: usize,
    pub after_samples: usize,
    pub forward_kcal_mol: Option<String>,
    pub backward_kcal_mol: Option<String>,
}

impl EstimateReport {
    pub fn new(windows: &WindowSet, estimate: &FepEstimate) -> Self {
        let windows = windows
            .iter()
            .map(|(window, bucket)| WindowReport {
                window: window.label().to_string(),
                before_samples: bucket.before.len(),
                this_samples: bucket.this.len(),
                after_samples: bucket.after.len(),
                forward_kcal_mol: estimate.forward().get(window).map(render_decimal),
                backward_kcal_mol: estimate.backward().get(window).map(render_decimal),
            })
            .collect();

        Self {
            windows,
            forward_total_kcal_mol: render_decimal(&estimate.total(Direction::Forward)),
            backward_total_kcal_mol: render_decimal(&estimate.total(Direction::Backward)),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn render_decimal(value: &BigDecimal) -> String {
    value.normalized().to_string()
}
