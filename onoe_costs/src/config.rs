// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;

/// The budget heads of the national line-item table.
///
/// The set is closed: the normal-cycle formula in the ledger matches on it
/// exhaustively, so a new head has to decide how it is paid across two
/// staggered elections.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Category {
    Capital,
    Operational,
    Logistics,
    Contingency,
    Infrastructure,
    Admin,
    Surveillance,
    Lifecycle,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Capital => "Capital",
            Category::Operational => "Operational",
            Category::Logistics => "Logistics",
            Category::Contingency => "Contingency",
            Category::Infrastructure => "Infrastructure",
            Category::Admin => "Admin",
            Category::Surveillance => "Surveillance",
            Category::Lifecycle => "Lifecycle",
        }
    }
}

/// One row of the national line-item table. Costs are in crores.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "Task_ID")]
    pub task_id: u32,
    #[serde(rename = "Task_Name")]
    pub task_name: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Sub_Unit_Details")]
    pub sub_unit_details: String,
    /// Missing (`NA`) for lump-sum heads.
    #[serde(rename = "Unit_Cost_INR", deserialize_with = "csv::invalid_option")]
    pub unit_cost_inr: Option<f64>,
    #[serde(rename = "Quantity_LS_Only")]
    pub quantity_ls_only: String,
    #[serde(rename = "Cost_LS_Only_Cr")]
    pub cost_ls_only: f64,
    #[serde(rename = "Quantity_State_Only")]
    pub quantity_state_only: String,
    #[serde(rename = "Cost_State_Only_Cr")]
    pub cost_state_only: f64,
    #[serde(rename = "Quantity_ONOE")]
    pub quantity_onoe: String,
    #[serde(rename = "Cost_ONOE_Cr")]
    pub cost_onoe: f64,
    #[serde(rename = "Impact_Note")]
    pub impact_note: String,
}

impl LineItem {
    /// True when every cost of the row, unit cost included, is a finite number.
    pub fn has_finite_costs(&self) -> bool {
        [self.cost_ls_only, self.cost_state_only, self.cost_onoe]
            .iter()
            .chain(self.unit_cost_inr.iter())
            .all(|c| c.is_finite())
    }
}

/// Security classification of a state. Drives the CAPF deployment size.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum SecurityTier {
    Normal,
    Sensitive,
    Conflict,
}

impl SecurityTier {
    pub fn multiplier(&self) -> f64 {
        match self {
            SecurityTier::Normal => 1.0,
            SecurityTier::Sensitive => 1.5,
            SecurityTier::Conflict => 2.5,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            SecurityTier::Normal => 1,
            SecurityTier::Sensitive => 2,
            SecurityTier::Conflict => 3,
        }
    }
}

impl TryFrom<u8> for SecurityTier {
    type Error = CostModelError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(SecurityTier::Normal),
            2 => Ok(SecurityTier::Sensitive),
            3 => Ok(SecurityTier::Conflict),
            x => Err(CostModelError::InvalidTier(x)),
        }
    }
}

/// Electoral metadata of a state or union territory.
#[derive(PartialEq, Debug, Clone)]
pub struct StateProfile {
    pub name: String,
    pub lok_sabha_seats: u32,
    pub assembly_seats: u32,
    pub tier: SecurityTier,
}

/// The states of a projection, keyed by name and kept in insertion order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct StateTable {
    pub(crate) states: Vec<StateProfile>,
}

impl StateTable {
    pub fn get(&self, name: &str) -> Option<&StateProfile> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateProfile> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

// ********* Configuration **********

/// Unit economics, in INR unless stated otherwise.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct UnitCosts {
    /// Ballot unit, control unit and VVPAT.
    pub evm_set: f64,
    /// Per vault.
    pub vvpat_slip_storage: f64,
    /// Per person for the election period.
    pub polling_staff_wage: f64,
    /// Crores per company (travel and logistics).
    pub security_company_cr: f64,
    /// Per vehicle per day.
    pub transport_vehicle: f64,
    /// Per booth.
    pub webcasting_camera: f64,
    /// Per vial.
    pub indelible_ink: f64,
}

impl UnitCosts {
    pub const DEFAULT: UnitCosts = UnitCosts {
        evm_set: 45000.0,
        vvpat_slip_storage: 5000.0,
        polling_staff_wage: 18000.0,
        security_company_cr: 2.5,
        transport_vehicle: 6000.0,
        webcasting_camera: 1500.0,
        indelible_ink: 180.0,
    };
}

/// Sizing rules and scenario factors of the projection.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Assumptions {
    /// Average polling booths per assembly constituency.
    pub booths_per_assembly_seat: u32,
    /// Presiding and polling officers.
    pub staff_per_booth: u32,
    /// Shared transport.
    pub vehicles_per_booth: f64,
    /// Jawans per company.
    pub security_company_size: u32,
    /// Base deployment per Lok Sabha constituency.
    pub companies_per_lok_sabha_seat: u32,
    /// Machines are reused between the two staggered polls.
    pub standard_evm_inventory: f64,
    /// Two sets per booth on the same day.
    pub onoe_evm_inventory: f64,
    /// Allowance hike for the combined workload.
    pub onoe_wage_premium: f64,
    /// Larger trucks for both sets of machines.
    pub onoe_transport_premium: f64,
    /// Number of separate polls in the staggered cycle.
    pub standard_polls: f64,
}

impl Assumptions {
    pub const DEFAULT: Assumptions = Assumptions {
        booths_per_assembly_seat: 250,
        staff_per_booth: 6,
        vehicles_per_booth: 0.8,
        security_company_size: 100,
        companies_per_lok_sabha_seat: 15,
        standard_evm_inventory: 1.2,
        onoe_evm_inventory: 2.4,
        onoe_wage_premium: 1.2,
        onoe_transport_premium: 1.1,
        standard_polls: 2.0,
    };
}

// ******** Output data structures *********

/// Coarse split used by the structural-shift charts.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum CostType {
    Capital,
    Operational,
}

impl CostType {
    pub fn of(category: Category) -> CostType {
        match category {
            Category::Capital | Category::Infrastructure | Category::Logistics => {
                CostType::Capital
            }
            Category::Operational
            | Category::Contingency
            | Category::Admin
            | Category::Surveillance
            | Category::Lifecycle => CostType::Operational,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CostType::Capital => "Capital (Assets)",
            CostType::Operational => "Operational (Running)",
        }
    }
}

/// Which side of the comparison a figure belongs to.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Scenario {
    Standard,
    Onoe,
}

/// Direction of a cost variance (ONOE minus standard).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Impact {
    #[serde(rename = "Savings")]
    Savings,
    #[serde(rename = "Cost Increase")]
    CostIncrease,
    #[serde(rename = "No Change")]
    NoChange,
}

impl Impact {
    pub fn from_variance(variance: f64) -> Impact {
        if variance < 0.0 {
            Impact::Savings
        } else if variance > 0.0 {
            Impact::CostIncrease
        } else {
            Impact::NoChange
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Impact::Savings => "Savings",
            Impact::CostIncrease => "Cost Increase",
            Impact::NoChange => "No Change",
        }
    }
}

/// A line item together with its derived columns.
#[derive(PartialEq, Debug, Clone)]
pub struct LedgerRow {
    pub item: LineItem,
    pub normal_cycle_cost: f64,
    pub difference: f64,
    pub cost_type: CostType,
}

/// The four budget heads projected for every state.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ProjectedLineItem {
    EvmProcurement,
    PollingStaffWages,
    CapfLogistics,
    LastMileTransport,
}

impl ProjectedLineItem {
    pub const ALL: [ProjectedLineItem; 4] = [
        ProjectedLineItem::EvmProcurement,
        ProjectedLineItem::PollingStaffWages,
        ProjectedLineItem::CapfLogistics,
        ProjectedLineItem::LastMileTransport,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProjectedLineItem::EvmProcurement => "EVM Procurement",
            ProjectedLineItem::PollingStaffWages => "Polling Staff Wages",
            ProjectedLineItem::CapfLogistics => "CAPF Logistics",
            ProjectedLineItem::LastMileTransport => "Last Mile Transport",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ProjectedLineItem::EvmProcurement => "Capital Assets",
            ProjectedLineItem::PollingStaffWages => "Human Resources",
            ProjectedLineItem::CapfLogistics => "Security",
            ProjectedLineItem::LastMileTransport => "Logistics",
        }
    }

    pub fn details(&self) -> &'static str {
        match self {
            ProjectedLineItem::EvmProcurement => "Ballot & Control Units",
            ProjectedLineItem::PollingStaffWages => "Remuneration for Teachers/Govt Staff",
            ProjectedLineItem::CapfLogistics => "Train/Air Movement of Forces",
            ProjectedLineItem::LastMileTransport => "Trucks/Buses for Booth Setup",
        }
    }

    pub fn funding(&self) -> &'static str {
        match self {
            ProjectedLineItem::EvmProcurement => "Center (LS) / State (VS)",
            ProjectedLineItem::PollingStaffWages => "Shared",
            ProjectedLineItem::CapfLogistics => "Center",
            ProjectedLineItem::LastMileTransport => "State",
        }
    }
}

/// One row of the per-state projection, as written to the CSV export.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StateProjectionRow {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Line_Item")]
    pub line_item: String,
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Funding")]
    pub funding: String,
    #[serde(rename = "Standard_Cycle_Cost_Cr")]
    pub standard_cost: f64,
    #[serde(rename = "ONOE_Cycle_Cost_Cr")]
    pub onoe_cost: f64,
    #[serde(rename = "Impact")]
    pub impact: Impact,
    #[serde(rename = "Variance_Cr")]
    pub variance: f64,
}

/// Totals of one state over its projected line items.
#[derive(PartialEq, Debug, Clone)]
pub struct StateSummary {
    pub state: String,
    pub standard_cost: f64,
    pub onoe_cost: f64,
    /// Standard minus ONOE: positive when simultaneous polls are cheaper.
    pub net_savings: f64,
}

/// Errors raised while building or evaluating the cost tables.
#[derive(Debug)]
pub enum CostModelError {
    /// The table has no rows to evaluate.
    EmptyTable,
    /// Security tiers are numbered 1 to 3.
    InvalidTier(u8),
    DuplicateState(String),
    /// A cost of the given task is infinite or not a number.
    NonFiniteCost(u32),
    Csv(csv::Error),
}

impl Error for CostModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CostModelError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for CostModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostModelError::EmptyTable => write!(f, "the cost table is empty"),
            CostModelError::InvalidTier(x) => {
                write!(f, "invalid security tier {} (expected 1, 2 or 3)", x)
            }
            CostModelError::DuplicateState(name) => {
                write!(f, "state {:?} is listed more than once", name)
            }
            CostModelError::NonFiniteCost(task_id) => {
                write!(f, "task {} has a cost that is not a finite number", task_id)
            }
            CostModelError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl From<csv::Error> for CostModelError {
    fn from(e: csv::Error) -> Self {
        CostModelError::Csv(e)
    }
}
