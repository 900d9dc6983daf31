use crate::config::FormationDef;
use crate::geo::Vec2D;
use crate::menu::ListSource;
use crate::warn;
use std::num::ParseFloatError;
use std::str::FromStr;
use strum_macros::Display;

/// Titles shown instead of an empty catalog. They have no members and can
/// never be placed.
const EMPTY_CATALOG_TITLES: [&str; 2] = ["No formations configured", "Check the configuration file"];

/// Errors for a malformed `type, x, y` unit line.
#[derive(Debug, Display)]
pub enum SlotParseError {
    FieldCount(usize),
    EmptyType,
    Offset(ParseFloatError),
}

impl std::error::Error for SlotParseError {}

impl From<ParseFloatError> for SlotParseError {
    fn from(value: ParseFloatError) -> Self { Self::Offset(value) }
}

/// One unit of a formation: the simulator object type and its offset from the
/// formation reference point, meters.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSlot {
    type_name: String,
    /// Lateral, starboard positive.
    offset_x: f64,
    /// Longitudinal, ahead positive.
    offset_y: f64,
}

impl MemberSlot {
    pub fn new(type_name: impl Into<String>, offset_x: f64, offset_y: f64) -> Self {
        Self { type_name: type_name.into(), offset_x, offset_y }
    }

    pub fn type_name(&self) -> &str { &self.type_name }
    pub fn offset_x(&self) -> f64 { self.offset_x }
    pub fn offset_y(&self) -> f64 { self.offset_y }

    /// The offset in the north/east frame of a formation heading north.
    pub fn local_offset(&self) -> Vec2D<f64> { Vec2D::new(self.offset_y, self.offset_x) }
}

impl FromStr for MemberSlot {
    type Err = SlotParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let [type_name, x, y] = parts.as_slice() else {
            return Err(SlotParseError::FieldCount(parts.len()));
        };
        if type_name.is_empty() {
            return Err(SlotParseError::EmptyType);
        }
        Ok(Self::new(*type_name, x.parse()?, y.parse()?))
    }
}

/// A named set of units placed together.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationTemplate {
    title: String,
    members: Vec<MemberSlot>,
}

impl FormationTemplate {
    pub fn new(title: impl Into<String>) -> Self { Self { title: title.into(), members: Vec::new() } }

    pub fn with_member(mut self, member: MemberSlot) -> Self {
        self.members.push(member);
        self
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn members(&self) -> &[MemberSlot] { &self.members }
    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    fn from_def(def: &FormationDef) -> Option<Self> {
        if def.title.trim().is_empty() {
            warn!("Skipping formation without title");
            return None;
        }
        let mut formation = Self::new(def.title.trim());
        for line in &def.units {
            match line.parse::<MemberSlot>() {
                Ok(slot) => formation.members.push(slot),
                Err(e) => warn!("Formation \"{}\": skipping unit \"{line}\": {e:?}", formation.title),
            }
        }
        if formation.is_empty() {
            warn!("Formation \"{}\" has no usable units, skipping", formation.title);
            return None;
        }
        Some(formation)
    }
}

/// The formations the operator can choose from, in definition order.
#[derive(Debug, Clone, Default)]
pub struct FormationCatalog {
    formations: Vec<FormationTemplate>,
}

impl FormationCatalog {
    /// Builds the catalog from configured definitions.
    ///
    /// Untitled and memberless definitions are dropped. If nothing remains the
    /// catalog holds the unplaceable placeholder entries instead.
    pub fn load<'a>(defs: impl IntoIterator<Item = &'a FormationDef>) -> Self {
        let formations: Vec<_> = defs.into_iter().filter_map(FormationTemplate::from_def).collect();
        if formations.is_empty() {
            return Self::placeholder();
        }
        Self { formations }
    }

    pub fn from_templates(formations: Vec<FormationTemplate>) -> Self { Self { formations } }

    fn placeholder() -> Self {
        Self { formations: EMPTY_CATALOG_TITLES.iter().map(|t| FormationTemplate::new(*t)).collect() }
    }

    pub fn get(&self, index: usize) -> Option<&FormationTemplate> { self.formations.get(index) }

    pub fn iter(&self) -> impl Iterator<Item = &FormationTemplate> { self.formations.iter() }
}

impl ListSource for FormationCatalog {
    fn item_count(&self) -> usize { self.formations.len() }

    fn item_label(&self, index: usize) -> String {
        self.formations.get(index).map(|f| f.title.clone()).unwrap_or_default()
    }
}
