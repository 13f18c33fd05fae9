// Default dashboard collection, restored by reset and used when storage is empty
use super::icon::Icon;
use super::panel::{ChartKind, ChartPanel, ChartPoint, GrowthType, MetricCard, Panel, PanelPayload};

fn metric(
    id: &str,
    title: &str,
    value: &str,
    unit: &str,
    growth: &str,
    growth_type: GrowthType,
    icon: Icon,
) -> Panel {
    Panel::new(
        id.to_string(),
        PanelPayload::Metric(MetricCard::new(
            id.to_string(),
            title.to_string(),
            value.to_string(),
            unit.to_string(),
            growth.to_string(),
            growth_type,
            icon,
        )),
    )
}

fn chart(id: &str, title: &str, kind: ChartKind, points: &[(&str, f64)]) -> Panel {
    let series = points
        .iter()
        .map(|(name, value)| ChartPoint::new(*name, *value))
        .collect();
    Panel::new(
        id.to_string(),
        PanelPayload::Chart(ChartPanel::new(id.to_string(), title.to_string(), kind, series)),
    )
}

pub fn default_collection() -> Vec<Panel> {
    vec![
        metric("1", "Добыча угля", "435", "млн тонн", "+2.3%", GrowthType::Positive, Icon::Pickaxe),
        metric("2", "Экспорт угля", "210", "млн тонн", "+8.5%", GrowthType::Positive, Icon::Ship),
        metric("3", "Запасы угля", "275", "млрд тонн", "0%", GrowthType::Neutral, Icon::Warehouse),
        metric(
            "4",
            "Численность работников",
            "125",
            "тыс. чел.",
            "-1.2%",
            GrowthType::Negative,
            Icon::Users,
        ),
        metric(
            "5",
            "Средняя зарплата",
            "85 400",
            "руб.",
            "+5.7%",
            GrowthType::Positive,
            Icon::Wallet,
        ),
        metric(
            "6",
            "Уровень травматизма",
            "0.42",
            "на 1 млн чел.-часов",
            "-12%",
            GrowthType::Positive,
            Icon::ShieldCheck,
        ),
        chart(
            "7",
            "Динамика добычи угля (2019-2023)",
            ChartKind::Line,
            &[("2019", 441.0), ("2020", 401.0), ("2021", 438.0), ("2022", 427.0), ("2023", 435.0)],
        ),
        chart(
            "8",
            "Структура экспорта угля по странам",
            ChartKind::Bar,
            &[
                ("Китай", 85.0),
                ("Турция", 32.0),
                ("Ю. Корея", 28.0),
                ("Япония", 24.0),
                ("ЕС", 18.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_unique_and_in_sync() {
        let panels = default_collection();
        let ids: HashSet<&str> = panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), panels.len());
        assert!(panels.iter().all(|p| p.payload.id() == p.id));
    }

    #[test]
    fn test_first_default_is_coal_output() {
        let panels = default_collection();
        let card = panels[0].as_metric().unwrap();
        assert_eq!(panels[0].id, "1");
        assert_eq!(card.title, "Добыча угля");
        assert_eq!(card.value, "435");
        assert_eq!(card.unit, "млн тонн");
        assert_eq!(card.growth, "+2.3%");
        assert_eq!(card.growth_type, GrowthType::Positive);
        assert_eq!(card.icon, Icon::Pickaxe);
    }
}
