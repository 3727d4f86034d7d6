use super::table::EmissionFactorEntry;

/// Declarative keep/drop rule over one tag dimension. `Include` keeps rows
/// whose tag value contains any listed token; `Exclude` keeps rows whose tag
/// value contains none of them.
#[derive(Debug, Clone, Copy)]
pub enum TagRule {
    Include(&'static [&'static str]),
    Exclude(&'static [&'static str]),
}

impl TagRule {
    pub fn allows(&self, value: &str) -> bool {
        match self {
            TagRule::Include(tokens) => tokens.iter().any(|token| value.contains(token)),
            TagRule::Exclude(tokens) => tokens.iter().all(|token| !value.contains(token)),
        }
    }
}

/// Per-activity rule set narrowing the selectable slice of the reference
/// table. A missing rule means no filtering on that dimension.
#[derive(Debug, Clone, Copy)]
pub struct ActivityFilter {
    pub activity: &'static str,
    pub scope: Option<TagRule>,
    pub state: Option<TagRule>,
    pub separate: Option<TagRule>,
}

impl ActivityFilter {
    pub fn matches(&self, entry: &EmissionFactorEntry) -> bool {
        let scope_ok = self
            .scope
            .map(|rule| rule.allows(&entry.scope))
            .unwrap_or(true);
        let state_ok = self
            .state
            .map(|rule| rule.allows(&entry.state))
            .unwrap_or(true);
        let separate_ok = self
            .separate
            .map(|rule| rule.allows(&entry.separate))
            .unwrap_or(true);
        scope_ok && state_ok && separate_ok
    }
}

const ACTIVITY_FILTERS: &[ActivityFilter] = &[
    ActivityFilter {
        activity: "stationary_combustion",
        scope: Some(TagRule::Include(&["Scope 1"])),
        state: None,
        separate: None,
    },
    ActivityFilter {
        // vehicles burn liquid and gaseous fuels only
        activity: "mobile_combustion",
        scope: Some(TagRule::Include(&["Scope 1"])),
        state: Some(TagRule::Exclude(&["Solid"])),
        separate: None,
    },
    ActivityFilter {
        activity: "purchased_energy",
        scope: Some(TagRule::Include(&["Scope 2"])),
        state: None,
        separate: None,
    },
    ActivityFilter {
        activity: "upstream_logistics",
        scope: Some(TagRule::Include(&["Scope 3"])),
        state: None,
        separate: Some(TagRule::Include(&["Freight"])),
    },
    ActivityFilter {
        activity: "waste_treatment",
        scope: Some(TagRule::Include(&["Scope 3"])),
        state: None,
        separate: Some(TagRule::Exclude(&["Freight"])),
    },
];

/// Looks up the declarative rule set for a calculator activity, if one is
/// registered.
pub fn filter_for(activity: &str) -> Option<&'static ActivityFilter> {
    ACTIVITY_FILTERS
        .iter()
        .find(|filter| filter.activity == activity)
}

/// Names of all registered activities, for selector surfaces.
pub fn activities() -> Vec<&'static str> {
    ACTIVITY_FILTERS
        .iter()
        .map(|filter| filter.activity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn entry(separate: &str, state: &str, scope: &str) -> EmissionFactorEntry {
        EmissionFactorEntry {
            category: "Test".to_string(),
            separate: separate.to_string(),
            raw_material: "Material".to_string(),
            unit: "kg".to_string(),
            kg_co2eq: Decimal::ONE,
            state: state.to_string(),
            scope: scope.to_string(),
        }
    }

    #[test]
    fn include_rule_requires_any_token() {
        let rule = TagRule::Include(&["Scope 1", "Scope 2"]);
        assert!(rule.allows("Scope 1"));
        assert!(rule.allows("Scope 2 (market based)"));
        assert!(!rule.allows("Scope 3"));
    }

    #[test]
    fn exclude_rule_rejects_every_token() {
        let rule = TagRule::Exclude(&["Solid"]);
        assert!(rule.allows("Liquid"));
        assert!(!rule.allows("Solid"));
    }

    #[test]
    fn missing_rule_dimensions_do_not_filter() {
        let filter = filter_for("stationary_combustion").expect("registered");
        assert!(filter.matches(&entry("Coal", "Solid", "Scope 1")));
        assert!(filter.matches(&entry("Petroleum", "Liquid", "Scope 1")));
        assert!(!filter.matches(&entry("Electricity", "Energy", "Scope 2")));
    }

    #[test]
    fn mobile_combustion_drops_solid_fuels() {
        let filter = filter_for("mobile_combustion").expect("registered");
        assert!(!filter.matches(&entry("Coal", "Solid", "Scope 1")));
        assert!(filter.matches(&entry("Petroleum", "Liquid", "Scope 1")));
    }

    #[test]
    fn unknown_activity_has_no_filter() {
        assert!(filter_for("fugitive_emissions").is_none());
        assert!(activities().contains(&"waste_treatment"));
    }
}
