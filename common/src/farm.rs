//! 農場データ（モック定数）
//!
//! 在庫・植物の健康状態・設備状態の3つ。起動時に生成し、以後は読み取り専用。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropStatus {
    Optimal,
    Low,
    Critical,
}

impl CropStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CropStatus::Optimal => "OPTIMAL",
            CropStatus::Low => "LOW",
            CropStatus::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub status: CropStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLevel {
    pub name: String,
    pub level: u8,
    pub unit: String,
}

/// 在庫
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub crops: Vec<Crop>,
    pub resources: Vec<ResourceLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantMetrics {
    pub plant: String,
    pub health: u8,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub humidity: f64,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRanges {
    #[serde(rename = "pH")]
    pub ph: Range,
    pub humidity: Range,
    pub temperature: Range,
}

/// 植物の健康状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantHealth {
    pub current_metrics: Vec<PlantMetrics>,
    pub optimal_ranges: OptimalRanges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    Operational,
    MaintenanceRequired,
    Critical,
}

impl ComponentState {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentState::Operational => "Operational",
            ComponentState::MaintenanceRequired => "Maintenance Required",
            ComponentState::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub name: String,
    pub status: ComponentState,
    pub efficiency: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
}

/// 設備状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub components: Vec<ComponentStatus>,
    pub alerts: Vec<Alert>,
}

pub fn inventory_data() -> Inventory {
    Inventory {
        crops: vec![Crop {
            name: "Maize".into(),
            quantity: 150,
            unit: "kg".into(),
            status: CropStatus::Optimal,
        }],
        resources: vec![
            resource("Water", 85),
            resource("Nutrients", 72),
            resource("Growing Medium", 90),
        ],
    }
}

pub fn plant_health_data() -> PlantHealth {
    PlantHealth {
        current_metrics: vec![PlantMetrics {
            plant: "Maize".into(),
            health: 92,
            ph: 6.2,
            humidity: 65.0,
            temperature: 23.5,
        }],
        optimal_ranges: OptimalRanges {
            ph: Range { min: 5.5, max: 6.5 },
            humidity: Range { min: 60.0, max: 75.0 },
            temperature: Range { min: 20.0, max: 26.0 },
        },
    }
}

pub fn system_status() -> SystemStatus {
    SystemStatus {
        components: vec![
            component("Irrigation System", ComponentState::Operational, 95),
            component("Climate Control", ComponentState::Operational, 88),
            component("Soil Monitoring", ComponentState::Operational, 94),
            component("Nutrient Delivery", ComponentState::MaintenanceRequired, 82),
        ],
        alerts: vec![
            alert(AlertLevel::Info, "Maize growth rate optimal"),
            alert(AlertLevel::Warning, "Nutrient levels need adjustment in 24 hours"),
            alert(AlertLevel::Info, "Soil moisture at recommended levels"),
        ],
    }
}

fn resource(name: &str, level: u8) -> ResourceLevel {
    ResourceLevel {
        name: name.into(),
        level,
        unit: "%".into(),
    }
}

fn component(name: &str, status: ComponentState, efficiency: u8) -> ComponentStatus {
    ComponentStatus {
        name: name.into(),
        status,
        efficiency,
    }
}

fn alert(level: AlertLevel, message: &str) -> Alert {
    Alert {
        level,
        message: message.into(),
    }
}

/// チャット応答に渡す農場データのスナップショット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    pub inventory: Inventory,
    pub plant_health: PlantHealth,
    pub system_status: SystemStatus,
}

impl ContextBundle {
    pub fn snapshot() -> Self {
        Self {
            inventory: inventory_data(),
            plant_health: plant_health_data(),
            system_status: system_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_constants() {
        let inventory = inventory_data();
        assert_eq!(inventory.crops[0].name, "Maize");
        assert_eq!(inventory.crops[0].quantity, 150);

        let levels: Vec<(&str, u8)> = inventory
            .resources
            .iter()
            .map(|r| (r.name.as_str(), r.level))
            .collect();
        assert_eq!(levels, vec![("Water", 85), ("Nutrients", 72), ("Growing Medium", 90)]);
    }

    #[test]
    fn test_current_metrics_within_optimal_ranges() {
        let health = plant_health_data();
        let metrics = &health.current_metrics[0];
        let ranges = &health.optimal_ranges;

        assert!(ranges.ph.contains(metrics.ph));
        assert!(ranges.humidity.contains(metrics.humidity));
        assert!(ranges.temperature.contains(metrics.temperature));
    }

    #[test]
    fn test_system_status_has_one_maintenance_item() {
        let status = system_status();
        let maintenance: Vec<&str> = status
            .components
            .iter()
            .filter(|c| c.status == ComponentState::MaintenanceRequired)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(maintenance, vec!["Nutrient Delivery"]);
    }

    #[test]
    fn test_snapshot_serialize_keys() {
        let json = serde_json::to_value(ContextBundle::snapshot()).expect("シリアライズ失敗");

        assert_eq!(json["plant_health"]["current_metrics"][0]["pH"], 6.2);
        assert_eq!(json["system_status"]["alerts"][1]["type"], "warning");
        assert_eq!(json["inventory"]["crops"][0]["status"], "optimal");
        assert_eq!(
            json["system_status"]["components"][3]["status"],
            "maintenance_required"
        );
    }

    #[test]
    fn test_status_values_deserialize() {
        let crop: CropStatus = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(crop, CropStatus::Low);
        let component: ComponentState = serde_json::from_str(r#""critical""#).unwrap();
        assert_eq!(component, ComponentState::Critical);
        assert_eq!(CropStatus::Critical.label(), "CRITICAL");
    }
}
