//! Default parameter table of the MASER simulation.
//!
//! Numeric fields that carry no physical lower limit still reject zero and negative values
//! (exclusive lower bound at 0). Angles are in degrees, phases in turns (0 – 1).
use super::{Bound, DefaultValue, FieldDescriptor, InputKind, ParamGroup};

const fn number(
    key: &'static str,
    label: &'static str,
    default: f64,
    min: Option<Bound>,
    max: Option<Bound>,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        kind: InputKind::Number,
        default: DefaultValue::Number(default),
        min,
        max,
    }
}

const POSITIVE: Option<Bound> = Some(Bound::exclusive(0.));
const NON_NEGATIVE: Option<Bound> = Some(Bound::inclusive(0.));
const RIGHT_ANGLE: Option<Bound> = Some(Bound::inclusive(90.));
const ONE_TURN: Option<Bound> = Some(Bound::inclusive(1.));

pub static STAR: [FieldDescriptor; 7] = [
    number("M_s", "Mass (solar masses):", 0.2, POSITIVE, None),
    number("R_s", "Radius (solar radii):", 0.3, POSITIVE, None),
    number("P_s", "Rotation period (days):", 0.8, POSITIVE, None),
    number("i_s", "Inclination (degrees):", 67., POSITIVE, RIGHT_ANGLE),
    number("B_s", "Magnetic field strength (Gauss):", 1000., POSITIVE, None),
    number("beta", "Magnetic obliquity (degrees):", 34., NON_NEGATIVE, RIGHT_ANGLE),
    number(
        "phi_s0",
        "Rotation phase at reference time (0-1):",
        0.1,
        NON_NEGATIVE,
        ONE_TURN,
    ),
];

pub static PLANET: [FieldDescriptor; 4] = [
    number(
        "a",
        "Orbital distance (stellar radii):",
        5.,
        Some(Bound::exclusive(1.)),
        None,
    ),
    number("i_p", "Orbital inclination (degrees):", 56., NON_NEGATIVE, RIGHT_ANGLE),
    number(
        "lam",
        "Projected spin-orbit angle (degrees):",
        23.,
        POSITIVE,
        Some(Bound::exclusive(360.)),
    ),
    number(
        "phi_p0",
        "Orbital phase at reference time (0-1):",
        0.6,
        NON_NEGATIVE,
        ONE_TURN,
    ),
];

pub static CONE: [FieldDescriptor; 2] = [
    number("alpha", "Opening angle (degrees):", 75., NON_NEGATIVE, RIGHT_ANGLE),
    number("dalpha", "Thickness (degrees):", 5., POSITIVE, RIGHT_ANGLE),
];

pub static OBSERVATION: [FieldDescriptor; 6] = [
    FieldDescriptor {
        key: "epoch",
        label: "Epoch (DD/MM/YYYY):",
        kind: InputKind::Date,
        default: DefaultValue::Text("2026-01-01"),
        min: None,
        max: None,
    },
    FieldDescriptor {
        key: "t_start",
        label: "Start time (UTC):",
        kind: InputKind::Time,
        default: DefaultValue::Text("00:00"),
        min: None,
        max: None,
    },
    number("duration", "Duration (hours):", 12., POSITIVE, None),
    number("dt", "Temporal resolution (s):", 10., POSITIVE, None),
    number("f", "Frequency (MHz):", 100., POSITIVE, None),
    number(
        "t_ref",
        "Reference time for phases (Julian date):",
        2461041.5,
        POSITIVE,
        None,
    ),
];

/// Ordered fields of a group.
pub fn fields(group: ParamGroup) -> &'static [FieldDescriptor] {
    match group {
        ParamGroup::Star => &STAR,
        ParamGroup::Planet => &PLANET,
        ParamGroup::Cone => &CONE,
        ParamGroup::Observation => &OBSERVATION,
    }
}

/// Every `(group, descriptor)` pair, groups in declaration order then fields in declaration order.
pub fn all_fields() -> impl Iterator<Item = (ParamGroup, &'static FieldDescriptor)> {
    ParamGroup::ALL
        .into_iter()
        .flat_map(|group| fields(group).iter().map(move |desc| (group, desc)))
}

/// Find a descriptor by group and key.
pub fn descriptor(group: ParamGroup, key: &str) -> Option<&'static FieldDescriptor> {
    fields(group).iter().find(|desc| desc.key == key)
}

/// Find a descriptor by key alone.
///
/// Keys are unique across the whole schema, so the first match is the only one.
pub fn find_key(key: &str) -> Option<(ParamGroup, &'static FieldDescriptor)> {
    all_fields().find(|(_, desc)| desc.key == key)
}

#[cfg(test)]
mod schema_test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_keys_unique_across_schema() {
        let mut seen = HashSet::new();
        for (_, desc) in all_fields() {
            assert!(seen.insert(desc.key), "duplicated key {}", desc.key);
        }
        assert_eq!(seen.len(), 19);
    }

    #[test]
    fn test_declaration_order() {
        let star: Vec<_> = fields(ParamGroup::Star).iter().map(|d| d.key).collect();
        assert_eq!(star, ["M_s", "R_s", "P_s", "i_s", "B_s", "beta", "phi_s0"]);

        let first = all_fields().next().unwrap();
        assert_eq!(first.0, ParamGroup::Star);
        let last = all_fields().last().unwrap();
        assert_eq!((last.0, last.1.key), (ParamGroup::Observation, "t_ref"));
    }

    #[test]
    fn test_input_kind_is_explicit() {
        assert_eq!(descriptor(ParamGroup::Observation, "epoch").unwrap().kind, InputKind::Date);
        assert_eq!(descriptor(ParamGroup::Observation, "t_start").unwrap().kind, InputKind::Time);
        assert!(all_fields()
            .filter(|(_, d)| d.kind != InputKind::Number)
            .all(|(_, d)| d.min.is_none() && d.max.is_none()));
    }

    #[test]
    fn test_bounds() {
        let i_s = descriptor(ParamGroup::Star, "i_s").unwrap();
        assert_eq!(i_s.min, Some(Bound::exclusive(0.)));
        assert_eq!(i_s.max, Some(Bound::inclusive(90.)));

        let a = descriptor(ParamGroup::Planet, "a").unwrap();
        assert_eq!(a.min, Some(Bound::exclusive(1.)));
        assert_eq!(a.max, None);

        let lam = find_key("lam").unwrap();
        assert_eq!(lam.0, ParamGroup::Planet);
        assert_eq!(lam.1.max, Some(Bound::exclusive(360.)));

        assert!(find_key("nope").is_none());
        assert!(descriptor(ParamGroup::Cone, "a").is_none());
    }
}
