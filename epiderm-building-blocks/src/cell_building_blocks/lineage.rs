use epiderm_concepts::{CellType, Differentiation, Lineage, LineageEvent, Size};

use serde::{Deserialize, Serialize};

/// Shared decision shape of the proliferating stages.
///
/// Thresholds are checked in order on the diameter of the mother, first match wins.
fn proliferate<C>(
    cell: &C,
    own_type: CellType,
    next_type: CellType,
    self_renewal_diameter: f64,
    commitment_diameter: f64,
) -> Option<LineageEvent>
where
    C: Differentiation + Size,
{
    if !cell.can_divide() {
        return None;
    }
    let diameter = cell.diameter();
    if diameter < self_renewal_diameter {
        Some(LineageEvent::Divide { daughter: own_type })
    } else if diameter < commitment_diameter {
        Some(LineageEvent::Divide {
            daughter: next_type,
        })
    } else {
        Some(LineageEvent::Arrest)
    }
}

/// Behavior of stem cells.
///
/// Small stem cells renew themselves, medium sized ones commit to the transit-amplifying stage
/// and large ones leave the cycle.
///
/// | diameter | event |
/// | --- | --- |
/// | `d < self_renewal_diameter` | divide, daughter [CellType::Stem] |
/// | `d < commitment_diameter` | divide, daughter [CellType::TransitAmplifying] |
/// | otherwise | arrest |
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct StemCell {
    /// Below this diameter the daughter remains a stem cell.
    pub self_renewal_diameter: f64,
    /// Below this diameter the daughter becomes transit-amplifying.
    pub commitment_diameter: f64,
}

impl Default for StemCell {
    fn default() -> Self {
        Self {
            self_renewal_diameter: 5.0,
            commitment_diameter: 8.0,
        }
    }
}

impl Lineage for StemCell {
    fn cell_type(&self) -> CellType {
        CellType::Stem
    }

    fn decide<C>(&self, cell: &C) -> Option<LineageEvent>
    where
        C: Differentiation + Size,
    {
        proliferate(
            cell,
            CellType::Stem,
            CellType::TransitAmplifying,
            self.self_renewal_diameter,
            self.commitment_diameter,
        )
    }
}

/// Behavior of transit-amplifying cells.
///
/// Same decision shape as [StemCell] but the daughters are either transit-amplifying or
/// differentiated.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct TransitAmplifying {
    /// Below this diameter the daughter remains transit-amplifying.
    pub self_renewal_diameter: f64,
    /// Below this diameter the daughter becomes differentiated.
    pub commitment_diameter: f64,
}

impl Default for TransitAmplifying {
    fn default() -> Self {
        Self {
            self_renewal_diameter: 8.0,
            commitment_diameter: 10.0,
        }
    }
}

impl Lineage for TransitAmplifying {
    fn cell_type(&self) -> CellType {
        CellType::TransitAmplifying
    }

    fn decide<C>(&self, cell: &C) -> Option<LineageEvent>
    where
        C: Differentiation + Size,
    {
        proliferate(
            cell,
            CellType::TransitAmplifying,
            CellType::Differentiated,
            self.self_renewal_diameter,
            self.commitment_diameter,
        )
    }
}

/// Behavior of terminally differentiated cells. They never divide.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct DifferentiatedCell {
    /// Cells larger than this diameter (re-)assert their differentiated type.
    pub commitment_diameter: f64,
}

impl Default for DifferentiatedCell {
    fn default() -> Self {
        Self {
            commitment_diameter: 10.0,
        }
    }
}

impl Lineage for DifferentiatedCell {
    fn cell_type(&self) -> CellType {
        CellType::Differentiated
    }

    fn decide<C>(&self, cell: &C) -> Option<LineageEvent>
    where
        C: Differentiation + Size,
    {
        if cell.diameter() > self.commitment_diameter {
            Some(LineageEvent::Commit(CellType::Differentiated))
        } else {
            None
        }
    }
}

/// The behavior module attached to a cell.
///
/// Every variant serves exactly one [CellType].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum BehaviorModule {
    /// See [StemCell]
    Stem(StemCell),
    /// See [TransitAmplifying]
    TransitAmplifying(TransitAmplifying),
    /// See [DifferentiatedCell]
    Differentiated(DifferentiatedCell),
}

impl Lineage for BehaviorModule {
    fn cell_type(&self) -> CellType {
        match self {
            BehaviorModule::Stem(b) => b.cell_type(),
            BehaviorModule::TransitAmplifying(b) => b.cell_type(),
            BehaviorModule::Differentiated(b) => b.cell_type(),
        }
    }

    fn decide<C>(&self, cell: &C) -> Option<LineageEvent>
    where
        C: Differentiation + Size,
    {
        match self {
            BehaviorModule::Stem(b) => b.decide(cell),
            BehaviorModule::TransitAmplifying(b) => b.decide(cell),
            BehaviorModule::Differentiated(b) => b.decide(cell),
        }
    }
}

/// Thresholds for all lineage stages.
///
/// Cells keep a copy of these rules so that a change of type always attaches the
/// module with the thresholds of the same rule set.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LineageRules {
    /// Rules for [CellType::Stem]
    pub stem: StemCell,
    /// Rules for [CellType::TransitAmplifying]
    pub transit_amplifying: TransitAmplifying,
    /// Rules for [CellType::Differentiated]
    pub differentiated: DifferentiatedCell,
}

impl LineageRules {
    /// Selects the module which serves the given type.
    pub fn module_for(&self, cell_type: CellType) -> BehaviorModule {
        match cell_type {
            CellType::Stem => BehaviorModule::Stem(self.stem),
            CellType::TransitAmplifying => BehaviorModule::TransitAmplifying(self.transit_amplifying),
            CellType::Differentiated => BehaviorModule::Differentiated(self.differentiated),
        }
    }
}
