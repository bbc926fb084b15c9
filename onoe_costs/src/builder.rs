pub use crate::config::*;
use crate::projection::project_all;

/// A builder for custom projections.
///
/// Starts from the built-in unit costs and assumptions with no states.
///
/// ```
/// use onoe_costs::builder::ProjectionBuilder;
/// # use onoe_costs::CostModelError;
///
/// let mut builder = ProjectionBuilder::new().unit_costs(&onoe_costs::UnitCosts::DEFAULT);
/// builder.add_state("Goa", 2, 40, 1)?;
/// builder.add_state("Manipur", 2, 60, 3)?;
///
/// let rows = builder.project()?;
/// assert_eq!(rows.len(), 8);
/// # Ok::<(), CostModelError>(())
/// ```
pub struct ProjectionBuilder {
    pub(crate) _costs: UnitCosts,
    pub(crate) _assumptions: Assumptions,
    pub(crate) _states: StateTable,
}

impl ProjectionBuilder {
    pub fn new() -> ProjectionBuilder {
        ProjectionBuilder {
            _costs: UnitCosts::DEFAULT,
            _assumptions: Assumptions::DEFAULT,
            _states: StateTable::default(),
        }
    }

    /// Starts from the built-in table of Indian states.
    pub fn india() -> ProjectionBuilder {
        ProjectionBuilder {
            _states: StateTable::india(),
            ..ProjectionBuilder::new()
        }
    }

    pub fn unit_costs(self, costs: &UnitCosts) -> ProjectionBuilder {
        ProjectionBuilder {
            _costs: *costs,
            ..self
        }
    }

    pub fn assumptions(self, assumptions: &Assumptions) -> ProjectionBuilder {
        ProjectionBuilder {
            _assumptions: *assumptions,
            ..self
        }
    }

    /// Adds a state. The tier is the numeric classification (1 to 3).
    pub fn add_state(
        &mut self,
        name: &str,
        lok_sabha_seats: u32,
        assembly_seats: u32,
        tier: u8,
    ) -> Result<(), CostModelError> {
        let tier = SecurityTier::try_from(tier)?;
        self.add_profile(StateProfile {
            name: name.to_string(),
            lok_sabha_seats,
            assembly_seats,
            tier,
        })
    }

    /// Adds a state, or replaces the seats and tier of a state already present.
    pub fn upsert_profile(&mut self, profile: StateProfile) {
        match self._states.states.iter_mut().find(|s| s.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self._states.states.push(profile),
        }
    }

    pub fn add_profile(&mut self, profile: StateProfile) -> Result<(), CostModelError> {
        if self._states.get(&profile.name).is_some() {
            return Err(CostModelError::DuplicateState(profile.name));
        }
        self._states.states.push(profile);
        Ok(())
    }

    pub fn states(&self) -> &StateTable {
        &self._states
    }

    pub fn costs(&self) -> &UnitCosts {
        &self._costs
    }

    pub fn current_assumptions(&self) -> &Assumptions {
        &self._assumptions
    }

    pub fn project(&self) -> Result<Vec<StateProjectionRow>, CostModelError> {
        project_all(&self._states, &self._costs, &self._assumptions)
    }
}

impl Default for ProjectionBuilder {
    fn default() -> Self {
        ProjectionBuilder::new()
    }
}
