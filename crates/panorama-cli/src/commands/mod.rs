//! CLI command implementations.

pub mod options;
pub mod query;
pub mod serve;

use panorama::{
    CatalogSpec, Dashboard, DashboardConfig, DimensionKey, PanoramaError, Selection,
    SelectionState,
};
use tracing::debug;

use crate::cli::DataArgs;

/// Load the dataset named on the command line with its catalog.
pub fn load_dashboard(args: &DataArgs) -> panorama::Result<Dashboard> {
    let mut catalog = match &args.config {
        Some(path) => CatalogSpec::load(path)?,
        None => CatalogSpec::default(),
    };
    for column in &args.questionnaires {
        catalog = catalog.with_questionnaire(column.as_str(), column.as_str());
    }

    let config = DashboardConfig {
        catalog,
        ..Default::default()
    };
    let dashboard = Dashboard::open_with_config(&args.file, config)?;
    debug!(
        file = %args.file.display(),
        respondents = dashboard.store().len(),
        dimensions = dashboard.catalog().dimensions().count(),
        "loaded dataset"
    );
    Ok(dashboard)
}

/// Parse `DIMENSION=V1,V2` into a filter selection.
pub fn parse_filter(arg: &str) -> panorama::Result<(DimensionKey, Selection)> {
    let (key, values) = arg.split_once('=').ok_or_else(|| {
        PanoramaError::InvalidSelection(format!("expected KEY=VALUES, got '{}'", arg))
    })?;
    let key: DimensionKey = key.parse()?;
    let selection = Selection::from_choices(values.split(',').map(str::trim));
    Ok((key, selection))
}

/// Build the selection state from repeated `--filter` arguments.
pub fn parse_filters(args: &[String]) -> panorama::Result<SelectionState> {
    let mut state = SelectionState::new();
    for arg in args {
        let (key, selection) = parse_filter(arg)?;
        state.set(key, selection);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorama::FieldValue;

    #[test]
    fn test_parse_filter_values() {
        let (key, selection) = parse_filter("gender=F, M").unwrap();
        assert_eq!(key, DimensionKey::plain("gender"));
        assert!(selection.accepts(&FieldValue::text("F")));
        assert!(selection.accepts(&FieldValue::text("M")));
        assert!(!selection.accepts(&FieldValue::text("X")));
    }

    #[test]
    fn test_parse_filter_question_key() {
        let (key, selection) = parse_filter("atlas_pergunta_6:Q1=3").unwrap();
        assert_eq!(key, DimensionKey::question("atlas_pergunta_6", "Q1"));
        assert!(selection.accepts(&FieldValue::Number(3.0)));
    }

    #[test]
    fn test_parse_filter_all_sentinel() {
        let (_, selection) = parse_filter("region=Todos").unwrap();
        assert!(selection.is_all());

        let state = parse_filters(&["region=all".to_string()]).unwrap();
        assert!(state.is_unrestricted());
    }

    #[test]
    fn test_parse_filter_rejects_missing_equals() {
        assert!(matches!(
            parse_filter("gender"),
            Err(PanoramaError::InvalidSelection(_))
        ));
    }
}
