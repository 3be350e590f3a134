use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;
use num_traits::{Float, FromPrimitive};

use crate::TestResult;

impl<F> TestResult<F>
where
    F: Float + Display + FromPrimitive,
{
    /// Renders the result as a bordered summary table with a plain-language
    /// interpretation of the p-value.
    pub fn display(&self) -> String {
        let c = |x: f64| F::from_f64(x).expect("display threshold fits in the float type");

        let p_0001 = c(0.0001);
        let p_05 = c(0.05);
        let p_10 = c(0.10);
        let stat_999 = c(999.0);

        let p_display = if self.p_value < p_0001 {
            "< 0.0001".to_string()
        } else {
            format!("{:.4}", self.p_value)
        };

        let stat_display = if self.statistic.abs() > stat_999 {
            format!("{:.1e}", self.statistic.to_f64().unwrap_or(0.0))
        } else {
            format!("{:.2}", self.statistic)
        };

        let p_interpretation = if self.p_value < p_05 {
            "🔴 Reject the null hypothesis"
        } else if self.p_value < p_10 {
            "🟠 Weak evidence against the null"
        } else {
            "🟢 Cannot reject the null hypothesis"
        };

        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![
                Cell::new(format!("Bootstrap Mean Test (H₀: {})", self.null_hypothesis))
                    .set_alignment(CellAlignment::Center),
            ]);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Metric").set_alignment(CellAlignment::Center),
                Cell::new("Value").set_alignment(CellAlignment::Center),
                Cell::new("Interpretation").set_alignment(CellAlignment::Center),
            ]);

        table
            .add_row(vec![
                Cell::new("p-value").set_alignment(CellAlignment::Left),
                Cell::new(&p_display).set_alignment(CellAlignment::Right),
                Cell::new(p_interpretation).set_alignment(CellAlignment::Left),
            ])
            .add_row(vec![
                Cell::new("Statistic").set_alignment(CellAlignment::Left),
                Cell::new(&stat_display).set_alignment(CellAlignment::Right),
                Cell::new("~ bootstrap t distribution").set_alignment(CellAlignment::Left),
            ]);

        if let Some(interval) = &self.confidence_interval {
            let interval_display = format!("[{:.4}, {:.4}]", interval.lower, interval.upper);
            let interval_interpretation = if !interval.is_computed() {
                String::from("⚪ Not computed")
            } else if !interval.is_bounded() {
                String::from("🔴 Alpha out of range")
            } else if let Some(confidence) = interval.confidence {
                format!("{:.0}% bootstrap-t interval", confidence * 100.0)
            } else {
                String::from("Bootstrap-t interval")
            };

            table.add_row(vec![
                Cell::new("Confidence interval").set_alignment(CellAlignment::Left),
                Cell::new(&interval_display).set_alignment(CellAlignment::Right),
                Cell::new(interval_interpretation).set_alignment(CellAlignment::Left),
            ]);
        }

        format!("{}\n{}", title_table, table)
    }
}

impl<F> Display for TestResult<F>
where
    F: Float + Display + FromPrimitive,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConfidenceInterval, TestResult};

    fn report(p_value: f64, interval: Option<ConfidenceInterval<f64>>) -> TestResult<f64> {
        TestResult {
            null_hypothesis: String::from("mean(x) = mean(y)"),
            statistic: 1.42,
            p_value,
            confidence_interval: interval,
        }
    }

    #[test]
    fn renders_a_rejection_without_an_interval() {
        let rendered = report(0.003, None).to_string();

        assert!(rendered.contains("p-value"));
        assert!(rendered.contains("0.0030"));
        assert!(rendered.contains("🔴"));
        assert!(!rendered.contains("Confidence"));
    }

    #[test]
    fn renders_the_interval_with_its_coverage() {
        let interval = ConfidenceInterval::new(26.5, 28.1)
            .with_estimate(27.3)
            .with_confidence(0.90);
        let rendered = report(0.42, Some(interval)).to_string();

        assert!(rendered.contains("🟢"));
        assert!(rendered.contains("26.5000"));
        assert!(rendered.contains("90%"));
    }

    #[test]
    fn flags_an_interval_from_an_invalid_alpha() {
        let rendered = report(0.42, Some(ConfidenceInterval::infinite())).to_string();

        assert!(rendered.contains("Alpha"));
    }
}
