// Panel form session - transient draft for one add/edit episode
use crate::application::id_allocator::IdAllocator;
use crate::domain::icon::Icon;
use crate::domain::panel::{
    ChartKind, ChartPanel, ChartPoint, GrowthType, MetricCard, Panel, PanelPayload, PanelType,
};
use thiserror::Error;

/// Charts need at least this many points; removal below it is ignored.
pub const MIN_CHART_POINTS: usize = 2;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown icon: {0}")]
    UnknownIcon(String),
    #[error("point {index} out of range for series of {len}")]
    PointOutOfRange { index: usize, len: usize },
    #[error("invalid {kind} draft: {source}")]
    InvalidDraft {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointEdit {
    Name(String),
    Value(f64),
}

impl PointEdit {
    /// Numeric field input: the leading number is taken (`"12.5 т"` is 12.5),
    /// input without one counts as zero.
    pub fn value_from_input(input: &str) -> Self {
        let value = numeric_prefix(input.trim_start())
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v != 0.0)
            .unwrap_or(0.0);
        PointEdit::Value(value)
    }
}

/// Longest prefix of the form `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(input: &str) -> &str {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &input[..end]
}

/// Output of a finished session: `target` is the edited panel, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub target: Option<String>,
    pub payload: PanelPayload,
}

/// One draft per panel type; `active` decides which one is committed.
#[derive(Debug, Clone)]
pub struct PanelForm {
    target: Option<String>,
    active: PanelType,
    metric: MetricCard,
    chart: ChartPanel,
}

impl PanelForm {
    pub fn begin(initial: Option<&Panel>, initial_type: PanelType, ids: &IdAllocator) -> Self {
        match initial {
            Some(panel) => {
                let mut form = Self {
                    target: Some(panel.id.clone()),
                    active: panel.kind(),
                    metric: MetricCard::blank(panel.id.clone()),
                    chart: ChartPanel::blank(panel.id.clone()),
                };
                form.replace_active(panel.payload.clone());
                form
            }
            None => {
                let id = ids.next_id();
                Self {
                    target: None,
                    active: initial_type,
                    metric: MetricCard::blank(id.clone()),
                    chart: ChartPanel::blank(id),
                }
            }
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn active_type(&self) -> PanelType {
        self.active
    }

    pub fn select_type(&mut self, kind: PanelType) {
        self.active = kind;
    }

    pub fn metric(&self) -> &MetricCard {
        &self.metric
    }

    pub fn chart(&self) -> &ChartPanel {
        &self.chart
    }

    /// The draft that `commit` would return right now.
    pub fn payload(&self) -> PanelPayload {
        match self.active {
            PanelType::Metric => PanelPayload::Metric(self.metric.clone()),
            PanelType::Chart => PanelPayload::Chart(self.chart.clone()),
        }
    }

    /// Fill the draft for `kind` from raw `data` and make it active.
    /// The icon name is checked against the registry here.
    pub fn fill(&mut self, kind: PanelType, data: serde_json::Value) -> Result<(), FormError> {
        if kind == PanelType::Metric {
            if let Some(name) = data.get("icon").and_then(|v| v.as_str()) {
                Icon::from_name(name).ok_or_else(|| FormError::UnknownIcon(name.to_string()))?;
            }
        }

        let mut payload = PanelPayload::from_tagged(kind, data).map_err(|source| {
            FormError::InvalidDraft {
                kind: kind.as_str(),
                source,
            }
        })?;
        let draft_id = match kind {
            PanelType::Metric => self.metric.id.clone(),
            PanelType::Chart => self.chart.id.clone(),
        };
        payload.set_id(&draft_id);
        self.replace_active(payload);
        Ok(())
    }

    fn replace_active(&mut self, payload: PanelPayload) {
        self.active = payload.kind();
        match payload {
            PanelPayload::Metric(card) => self.metric = card,
            PanelPayload::Chart(chart) => self.chart = chart,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metric.title = title.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.metric.value = value.into();
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.metric.unit = unit.into();
    }

    pub fn set_growth(&mut self, growth: impl Into<String>) {
        self.metric.growth = growth.into();
    }

    pub fn set_growth_type(&mut self, growth_type: GrowthType) {
        self.metric.growth_type = growth_type;
    }

    pub fn set_icon(&mut self, icon: Icon) {
        self.metric.icon = icon;
    }

    pub fn set_icon_name(&mut self, name: &str) -> Result<(), FormError> {
        let icon = Icon::from_name(name).ok_or_else(|| FormError::UnknownIcon(name.to_string()))?;
        self.metric.icon = icon;
        Ok(())
    }

    pub fn set_chart_title(&mut self, title: impl Into<String>) {
        self.chart.title = title.into();
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart.kind = kind;
    }

    pub fn add_point(&mut self) {
        self.chart.series.push(ChartPoint::new("", 0.0));
    }

    /// Returns false when the index is out of range or the series is already
    /// at its minimum length.
    pub fn remove_point(&mut self, index: usize) -> bool {
        if self.chart.series.len() <= MIN_CHART_POINTS || index >= self.chart.series.len() {
            return false;
        }
        self.chart.series.remove(index);
        true
    }

    pub fn update_point(&mut self, index: usize, edit: PointEdit) -> Result<(), FormError> {
        let len = self.chart.series.len();
        let point = self
            .chart
            .series
            .get_mut(index)
            .ok_or(FormError::PointOutOfRange { index, len })?;
        match edit {
            PointEdit::Name(name) => point.name = name,
            PointEdit::Value(value) => point.value = value,
        }
        Ok(())
    }

    pub fn commit(self) -> Commit {
        let payload = self.payload();
        Commit {
            target: self.target,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::id_allocator::test_clock::ManualClock;
    use crate::domain::defaults::default_collection;
    use serde_json::json;
    use std::sync::Arc;

    fn ids() -> IdAllocator {
        IdAllocator::new(Arc::new(ManualClock::at(1_700_000_000_000)))
    }

    fn two_point_chart() -> Panel {
        Panel::new(
            "c".to_string(),
            PanelPayload::Chart(ChartPanel::new(
                "c".to_string(),
                "t".to_string(),
                ChartKind::Line,
                vec![ChartPoint::new("a", 1.0), ChartPoint::new("b", 2.0)],
            )),
        )
    }

    #[test]
    fn test_new_metric_draft_defaults() {
        let form = PanelForm::begin(None, PanelType::Metric, &ids());

        assert_eq!(form.target(), None);
        assert_eq!(form.active_type(), PanelType::Metric);
        assert_eq!(form.metric().id, "1700000000000");
        assert_eq!(form.metric().title, "");
        assert_eq!(form.metric().growth_type, GrowthType::Neutral);
        assert_eq!(form.metric().icon, Icon::BarChart3);
    }

    #[test]
    fn test_new_chart_draft_defaults() {
        let form = PanelForm::begin(None, PanelType::Chart, &ids());

        let PanelPayload::Chart(chart) = form.payload() else {
            panic!("expected chart draft");
        };
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.series.len(), 5);
        assert_eq!(chart.series[0], ChartPoint::new("2019", 0.0));
    }

    #[test]
    fn test_edit_copies_payload_and_keeps_target() {
        let panels = default_collection();
        let mut form = PanelForm::begin(Some(&panels[6]), PanelType::Metric, &ids());

        assert_eq!(form.target(), Some("7"));
        assert_eq!(form.active_type(), PanelType::Chart);
        assert_eq!(form.chart(), panels[6].as_chart().unwrap());

        form.set_chart_title("changed");
        assert_eq!(
            panels[6].as_chart().unwrap().title,
            "Динамика добычи угля (2019-2023)"
        );
    }

    #[test]
    fn test_remove_point_stops_at_two() {
        let mut form = PanelForm::begin(Some(&two_point_chart()), PanelType::Chart, &ids());

        assert!(!form.remove_point(0));
        assert_eq!(form.chart().series.len(), 2);
    }

    #[test]
    fn test_add_and_remove_points() {
        let mut form = PanelForm::begin(None, PanelType::Chart, &ids());

        form.add_point();
        assert_eq!(form.chart().series.len(), 6);
        assert_eq!(form.chart().series[5], ChartPoint::new("", 0.0));

        assert!(form.remove_point(1));
        let names: Vec<&str> = form.chart().series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["2019", "2021", "2022", "2023", ""]);
        assert!(!form.remove_point(17));
    }

    #[test]
    fn test_update_point_touches_one_field() {
        let mut form = PanelForm::begin(None, PanelType::Chart, &ids());

        form.update_point(2, PointEdit::Name("2021 H1".to_string())).unwrap();
        form.update_point(3, PointEdit::value_from_input("427.5")).unwrap();

        assert_eq!(form.chart().series[2], ChartPoint::new("2021 H1", 0.0));
        assert_eq!(form.chart().series[3], ChartPoint::new("2022", 427.5));
        assert!(matches!(
            form.update_point(9, PointEdit::Value(1.0)),
            Err(FormError::PointOutOfRange { index: 9, len: 5 })
        ));
    }

    #[test]
    fn test_value_input_defaults_to_zero() {
        assert_eq!(PointEdit::value_from_input("abc"), PointEdit::Value(0.0));
        assert_eq!(PointEdit::value_from_input(""), PointEdit::Value(0.0));
        assert_eq!(PointEdit::value_from_input(" -3 "), PointEdit::Value(-3.0));
    }

    #[test]
    fn test_value_input_takes_leading_number() {
        assert_eq!(PointEdit::value_from_input("12.5 т"), PointEdit::Value(12.5));
        assert_eq!(PointEdit::value_from_input("435млн"), PointEdit::Value(435.0));
        assert_eq!(PointEdit::value_from_input(".5"), PointEdit::Value(0.5));
        assert_eq!(PointEdit::value_from_input("7."), PointEdit::Value(7.0));
        assert_eq!(PointEdit::value_from_input("1e3x"), PointEdit::Value(1000.0));
        assert_eq!(PointEdit::value_from_input("2e"), PointEdit::Value(2.0));
        assert_eq!(PointEdit::value_from_input("-.x"), PointEdit::Value(0.0));
        assert_eq!(PointEdit::value_from_input("т 12"), PointEdit::Value(0.0));
    }

    #[test]
    fn test_icon_names_are_validated() {
        let mut form = PanelForm::begin(None, PanelType::Metric, &ids());

        form.set_icon_name("Truck").unwrap();
        assert_eq!(form.metric().icon, Icon::Truck);
        assert!(matches!(form.set_icon_name("Rocket"), Err(FormError::UnknownIcon(_))));
        assert_eq!(form.metric().icon, Icon::Truck);
    }

    #[test]
    fn test_commit_accepts_blank_fields() {
        let mut form = PanelForm::begin(None, PanelType::Metric, &ids());
        form.set_value("not a number");

        let commit = form.commit();

        assert_eq!(commit.target, None);
        let PanelPayload::Metric(card) = commit.payload else {
            panic!("expected metric payload");
        };
        assert_eq!(card.title, "");
        assert_eq!(card.value, "not a number");
    }

    #[test]
    fn test_switching_type_retags_edit() {
        let panels = default_collection();
        let mut form = PanelForm::begin(Some(&panels[0]), PanelType::Metric, &ids());

        form.select_type(PanelType::Chart);
        form.set_chart_kind(ChartKind::Bar);
        let commit = form.commit();

        assert_eq!(commit.target.as_deref(), Some("1"));
        assert_eq!(commit.payload.kind(), PanelType::Chart);
        assert_eq!(commit.payload.id(), "1");
    }

    #[test]
    fn test_fill_rejects_unknown_icon() {
        let mut form = PanelForm::begin(None, PanelType::Metric, &ids());
        let data = json!({
            "id": "", "title": "x", "value": "1", "unit": "", "growth": "",
            "growthType": "neutral", "icon": "Rocket"
        });

        assert!(matches!(
            form.fill(PanelType::Metric, data),
            Err(FormError::UnknownIcon(name)) if name == "Rocket"
        ));
    }

    #[test]
    fn test_fill_keeps_draft_id() {
        let mut form = PanelForm::begin(None, PanelType::Metric, &ids());
        let data = json!({ "id": "client", "title": "Rail", "type": "bar", "data": [] });

        form.fill(PanelType::Chart, data).unwrap();

        assert_eq!(form.active_type(), PanelType::Chart);
        assert_eq!(form.chart().id, "1700000000000");
        assert_eq!(form.chart().kind, ChartKind::Bar);
    }
}
