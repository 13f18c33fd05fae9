// Icon registry for metric cards
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Icon {
    Pickaxe,
    Ship,
    Warehouse,
    Users,
    Wallet,
    ShieldCheck,
    #[default]
    BarChart3,
    Factory,
    Truck,
    Globe,
    Zap,
    Settings,
    /// A name outside the registry, kept verbatim so stored and imported
    /// collections survive a round trip. Renders as the default icon.
    Unknown(String),
}

static ALL: [Icon; 12] = [
    Icon::Pickaxe,
    Icon::Ship,
    Icon::Warehouse,
    Icon::Users,
    Icon::Wallet,
    Icon::ShieldCheck,
    Icon::BarChart3,
    Icon::Factory,
    Icon::Truck,
    Icon::Globe,
    Icon::Zap,
    Icon::Settings,
];

impl Icon {
    /// Registry order, as listed in the icon picker.
    pub fn all() -> &'static [Icon] {
        &ALL
    }

    pub fn name(&self) -> &str {
        match self {
            Icon::Pickaxe => "Pickaxe",
            Icon::Ship => "Ship",
            Icon::Warehouse => "Warehouse",
            Icon::Users => "Users",
            Icon::Wallet => "Wallet",
            Icon::ShieldCheck => "ShieldCheck",
            Icon::BarChart3 => "BarChart3",
            Icon::Factory => "Factory",
            Icon::Truck => "Truck",
            Icon::Globe => "Globe",
            Icon::Zap => "Zap",
            Icon::Settings => "Settings",
            Icon::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Icon::Unknown(_))
    }

    /// The registry icon to draw: unknown names fall back to the default.
    pub fn resolved(&self) -> Icon {
        match self {
            Icon::Unknown(_) => Icon::default(),
            known => known.clone(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Icon::Pickaxe => "Кирка (добыча)",
            Icon::Ship => "Корабль (экспорт)",
            Icon::Warehouse => "Склад (запасы)",
            Icon::Users => "Люди (работники)",
            Icon::Wallet => "Кошелёк (зарплата)",
            Icon::ShieldCheck => "Щит (безопасность)",
            Icon::BarChart3 => "График",
            Icon::Factory => "Завод",
            Icon::Truck => "Грузовик",
            Icon::Globe => "Глобус",
            Icon::Zap => "Молния (энергия)",
            Icon::Settings => "Настройки",
            Icon::Unknown(_) => Icon::default().label(),
        }
    }

    /// Registry lookup; never yields `Unknown`.
    pub fn from_name(name: &str) -> Option<Icon> {
        ALL.iter().find(|icon| icon.name() == name).cloned()
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Icon::from_name(&name).unwrap_or(Icon::Unknown(name)))
    }
}
