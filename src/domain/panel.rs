// Panel domain model
use super::icon::Icon;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    Metric,
    Chart,
}

impl PanelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelType::Metric => "metric",
            PanelType::Chart => "chart",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthType {
    Positive,
    Negative,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    pub id: String,
    pub title: String,
    pub value: String,
    pub unit: String,
    pub growth: String,
    pub growth_type: GrowthType,
    pub icon: Icon,
}

impl MetricCard {
    pub fn new(
        id: String,
        title: String,
        value: String,
        unit: String,
        growth: String,
        growth_type: GrowthType,
        icon: Icon,
    ) -> Self {
        Self {
            id,
            title,
            value,
            unit,
            growth,
            growth_type,
            icon,
        }
    }

    /// Blank card as offered by the "add panel" form.
    pub fn blank(id: String) -> Self {
        Self::new(
            id,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            GrowthType::Neutral,
            Icon::default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(rename = "data")]
    pub series: Vec<ChartPoint>,
}

impl ChartPanel {
    pub fn new(id: String, title: String, kind: ChartKind, series: Vec<ChartPoint>) -> Self {
        Self {
            id,
            title,
            kind,
            series,
        }
    }

    /// Blank line chart with one zero point per year, 2019 through 2023.
    pub fn blank(id: String) -> Self {
        let series = (2019..=2023)
            .map(|year| ChartPoint::new(year.to_string(), 0.0))
            .collect();
        Self::new(id, String::new(), ChartKind::Line, series)
    }
}

/// Serializes as the bare variant payload; the tag lives on `Panel`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelPayload {
    Metric(MetricCard),
    Chart(ChartPanel),
}

impl PanelPayload {
    pub fn kind(&self) -> PanelType {
        match self {
            PanelPayload::Metric(_) => PanelType::Metric,
            PanelPayload::Chart(_) => PanelType::Chart,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PanelPayload::Metric(card) => &card.id,
            PanelPayload::Chart(chart) => &chart.id,
        }
    }

    pub fn set_id(&mut self, id: &str) {
        match self {
            PanelPayload::Metric(card) => card.id = id.to_string(),
            PanelPayload::Chart(chart) => chart.id = id.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PanelPayload::Metric(card) => &card.title,
            PanelPayload::Chart(chart) => &chart.title,
        }
    }

    /// Decode a `data` object according to its `type` tag.
    pub fn from_tagged(kind: PanelType, data: serde_json::Value) -> serde_json::Result<Self> {
        match kind {
            PanelType::Metric => serde_json::from_value(data).map(PanelPayload::Metric),
            PanelType::Chart => serde_json::from_value(data).map(PanelPayload::Chart),
        }
    }
}

/// A dashboard tile. `payload` carries its own copy of `id`, kept equal to
/// `Panel::id` by every constructor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PanelRecord")]
pub struct Panel {
    pub id: String,
    pub payload: PanelPayload,
}

impl Panel {
    pub fn new(id: String, mut payload: PanelPayload) -> Self {
        payload.set_id(&id);
        Self { id, payload }
    }

    pub fn kind(&self) -> PanelType {
        self.payload.kind()
    }

    pub fn as_metric(&self) -> Option<&MetricCard> {
        match &self.payload {
            PanelPayload::Metric(card) => Some(card),
            PanelPayload::Chart(_) => None,
        }
    }

    pub fn as_chart(&self) -> Option<&ChartPanel> {
        match &self.payload {
            PanelPayload::Chart(chart) => Some(chart),
            PanelPayload::Metric(_) => None,
        }
    }
}

// Wire shape is `{"id", "type", "data"}`, written in that order.
impl Serialize for Panel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Panel", 3)?;
        record.serialize_field("id", &self.id)?;
        record.serialize_field("type", &self.kind())?;
        record.serialize_field("data", &self.payload)?;
        record.end()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PanelType,
    pub data: serde_json::Value,
}

impl TryFrom<PanelRecord> for Panel {
    type Error = serde_json::Error;

    fn try_from(record: PanelRecord) -> Result<Self, Self::Error> {
        let payload = PanelPayload::from_tagged(record.kind, record.data)?;
        Ok(Panel::new(record.id, payload))
    }
}
