use crate::onoe::*;

use onoe_costs::builder::ProjectionBuilder;
use onoe_costs::{Assumptions, SecurityTier, StateProfile, UnitCosts};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitCostsConfig {
    #[serde(rename = "evmSet")]
    pub evm_set: Option<f64>,
    #[serde(rename = "vvpatSlipStorage")]
    pub vvpat_slip_storage: Option<f64>,
    #[serde(rename = "pollingStaffWage")]
    pub polling_staff_wage: Option<f64>,
    #[serde(rename = "securityCompanyCr")]
    pub security_company_cr: Option<f64>,
    #[serde(rename = "transportVehicle")]
    pub transport_vehicle: Option<f64>,
    #[serde(rename = "webcastingCam")]
    pub webcasting_camera: Option<f64>,
    #[serde(rename = "indelibleInk")]
    pub indelible_ink: Option<f64>,
}

impl UnitCostsConfig {
    pub fn resolve(&self) -> UnitCosts {
        let d = UnitCosts::DEFAULT;
        UnitCosts {
            evm_set: self.evm_set.unwrap_or(d.evm_set),
            vvpat_slip_storage: self.vvpat_slip_storage.unwrap_or(d.vvpat_slip_storage),
            polling_staff_wage: self.polling_staff_wage.unwrap_or(d.polling_staff_wage),
            security_company_cr: self.security_company_cr.unwrap_or(d.security_company_cr),
            transport_vehicle: self.transport_vehicle.unwrap_or(d.transport_vehicle),
            webcasting_camera: self.webcasting_camera.unwrap_or(d.webcasting_camera),
            indelible_ink: self.indelible_ink.unwrap_or(d.indelible_ink),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssumptionsConfig {
    #[serde(rename = "boothsPerAssemblySeat")]
    pub booths_per_assembly_seat: Option<u32>,
    #[serde(rename = "staffPerBooth")]
    pub staff_per_booth: Option<u32>,
    #[serde(rename = "vehiclesPerBooth")]
    pub vehicles_per_booth: Option<f64>,
    #[serde(rename = "securityCompanySize")]
    pub security_company_size: Option<u32>,
    #[serde(rename = "companiesPerLokSabhaSeat")]
    pub companies_per_lok_sabha_seat: Option<u32>,
    #[serde(rename = "standardEvmInventory")]
    pub standard_evm_inventory: Option<f64>,
    #[serde(rename = "onoeEvmInventory")]
    pub onoe_evm_inventory: Option<f64>,
    #[serde(rename = "onoeWagePremium")]
    pub onoe_wage_premium: Option<f64>,
    #[serde(rename = "onoeTransportPremium")]
    pub onoe_transport_premium: Option<f64>,
    #[serde(rename = "standardPolls")]
    pub standard_polls: Option<f64>,
}

impl AssumptionsConfig {
    pub fn resolve(&self) -> Assumptions {
        let d = Assumptions::DEFAULT;
        Assumptions {
            booths_per_assembly_seat: self
                .booths_per_assembly_seat
                .unwrap_or(d.booths_per_assembly_seat),
            staff_per_booth: self.staff_per_booth.unwrap_or(d.staff_per_booth),
            vehicles_per_booth: self.vehicles_per_booth.unwrap_or(d.vehicles_per_booth),
            security_company_size: self
                .security_company_size
                .unwrap_or(d.security_company_size),
            companies_per_lok_sabha_seat: self
                .companies_per_lok_sabha_seat
                .unwrap_or(d.companies_per_lok_sabha_seat),
            standard_evm_inventory: self
                .standard_evm_inventory
                .unwrap_or(d.standard_evm_inventory),
            onoe_evm_inventory: self.onoe_evm_inventory.unwrap_or(d.onoe_evm_inventory),
            onoe_wage_premium: self.onoe_wage_premium.unwrap_or(d.onoe_wage_premium),
            onoe_transport_premium: self
                .onoe_transport_premium
                .unwrap_or(d.onoe_transport_premium),
            standard_polls: self.standard_polls.unwrap_or(d.standard_polls),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    pub name: String,
    #[serde(rename = "lokSabhaSeats")]
    pub lok_sabha_seats: u32,
    #[serde(rename = "assemblySeats")]
    pub assembly_seats: u32,
    #[serde(rename = "securityTier")]
    pub security_tier: u8,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnoeConfig {
    #[serde(rename = "unitCosts")]
    pub unit_costs: Option<UnitCostsConfig>,
    pub assumptions: Option<AssumptionsConfig>,
    pub states: Option<Vec<StateConfig>>,
    /// Project only the listed states instead of amending the built-in table.
    #[serde(rename = "replaceStates")]
    pub replace_states: Option<bool>,
}

impl OnoeConfig {
    pub fn to_builder(&self) -> BOnoeResult<ProjectionBuilder> {
        let costs = self.unit_costs.clone().unwrap_or_default().resolve();
        let assumptions = self.assumptions.clone().unwrap_or_default().resolve();
        let base = if self.replace_states.unwrap_or(false) {
            ProjectionBuilder::new()
        } else {
            ProjectionBuilder::india()
        };
        let mut builder = base.unit_costs(&costs).assumptions(&assumptions);
        for sc in self.states.iter().flatten() {
            let tier = SecurityTier::try_from(sc.security_tier).context(CostModelSnafu {})?;
            let profile = StateProfile {
                name: sc.name.clone(),
                lok_sabha_seats: sc.lok_sabha_seats,
                assembly_seats: sc.assembly_seats,
                tier,
            };
            if self.replace_states.unwrap_or(false) {
                builder.add_profile(profile).context(CostModelSnafu {})?;
            } else {
                builder.upsert_profile(profile);
            }
        }
        Ok(builder)
    }
}

pub fn parse_config(contents: &str) -> BOnoeResult<OnoeConfig> {
    let config: OnoeConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_config(path: &str) -> BOnoeResult<OnoeConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_the_default_model() {
        let b = parse_config("{}").unwrap().to_builder().unwrap();
        assert_eq!(*b.costs(), UnitCosts::DEFAULT);
        assert_eq!(*b.current_assumptions(), Assumptions::DEFAULT);
        assert_eq!(b.states().len(), 30);
    }

    #[test]
    fn partial_overrides() {
        let js = r#"{
            "unitCosts": { "evmSet": 50000 },
            "assumptions": { "boothsPerAssemblySeat": 300 },
            "states": [
                { "name": "Goa", "lokSabhaSeats": 2, "assemblySeats": 40, "securityTier": 2 },
                { "name": "Ladakh", "lokSabhaSeats": 1, "assemblySeats": 10, "securityTier": 3 }
            ]
        }"#;
        let b = parse_config(js).unwrap().to_builder().unwrap();
        assert_eq!(b.costs().evm_set, 50000.0);
        assert_eq!(b.costs().polling_staff_wage, 18000.0);
        assert_eq!(b.current_assumptions().booths_per_assembly_seat, 300);
        assert_eq!(b.current_assumptions().staff_per_booth, 6);
        assert_eq!(b.states().len(), 31);
        assert_eq!(b.states().get("Goa").unwrap().tier, SecurityTier::Sensitive);
    }

    #[test]
    fn replace_states() {
        let js = r#"{
            "replaceStates": true,
            "states": [ { "name": "Haryana", "lokSabhaSeats": 10, "assemblySeats": 90, "securityTier": 1 } ]
        }"#;
        let rows = parse_config(js)
            .unwrap()
            .to_builder()
            .unwrap()
            .project()
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].standard_cost, 121.5);
    }

    #[test]
    fn invalid_tier() {
        let js = r#"{ "states": [ { "name": "X", "lokSabhaSeats": 1, "assemblySeats": 1, "securityTier": 7 } ] }"#;
        let err = parse_config(js).unwrap().to_builder().err().unwrap();
        assert!(matches!(
            *err,
            OnoeError::CostModel {
                source: CostModelError::InvalidTier(7)
            }
        ));
    }

    #[test]
    fn malformed_json() {
        let err = parse_config("{ \"unitCosts\": ").unwrap_err();
        assert!(matches!(*err, OnoeError::ParsingJson { .. }));
    }
}
