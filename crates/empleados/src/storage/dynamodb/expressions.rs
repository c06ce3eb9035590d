//! Query expression building.
//!
//! Pure functions that describe each query as a [`QueryPlan`]: key condition,
//! optional filter, and the placeholder values they reference. The repository
//! turns a plan into an SDK request; nothing here touches the network.

use uuid::Uuid;

use super::keys;

/// Key condition shared by every partition-marker query.
pub const MARKER_KEY_CONDITION: &str = "hk = :hk";

/// A fully described DynamoDB query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub index_name: Option<String>,
    pub key_condition: String,
    pub filter: Option<String>,
    /// Placeholder name and string value pairs, in placeholder order.
    pub values: Vec<(String, String)>,
    pub consistent_read: Option<bool>,
}

impl QueryPlan {
    /// Query over one partition marker of the base table.
    fn for_marker(marker: &str) -> Self {
        Self {
            index_name: None,
            key_condition: MARKER_KEY_CONDITION.to_string(),
            filter: None,
            values: vec![(":hk".to_string(), marker.to_string())],
            consistent_read: None,
        }
    }
}

/// All employees.
pub fn find_all_plan() -> QueryPlan {
    QueryPlan::for_marker(keys::empleado_pk())
}

/// Employees with the given `cedula`, read from the secondary index.
///
/// Global secondary indexes only support eventually consistent reads.
pub fn find_by_cedula_plan(index_name: &str, cedula: &str) -> QueryPlan {
    QueryPlan {
        index_name: Some(index_name.to_string()),
        key_condition: format!("{} = :cedula", keys::CEDULA),
        filter: None,
        values: vec![(":cedula".to_string(), cedula.to_string())],
        consistent_read: Some(false),
    }
}

/// Employees whose `busqueda` contains every term.
///
/// Without terms no filter is attached and the plan matches every employee.
pub fn search_plan(terms: &[String]) -> QueryPlan {
    let mut plan = QueryPlan::for_marker(keys::empleado_pk());
    if let Some((filter, values)) = contains_filter(terms) {
        plan.filter = Some(filter);
        plan.values.extend(values);
    }
    plan
}

/// Logs owned by `codigo`.
pub fn logs_by_owner_plan(codigo: Uuid) -> QueryPlan {
    let mut plan = QueryPlan::for_marker(keys::log_pk());
    plan.filter = Some(format!("{} = :codigo", keys::entidad_codigo_path()));
    plan.values.push((":codigo".to_string(), codigo.to_string()));
    plan
}

/// Builds `contains(busqueda, :var1) and contains(busqueda, :var2) ...`.
///
/// Placeholders are numbered from 1 in term order. Returns `None` for an
/// empty term list since DynamoDB rejects an empty filter expression.
pub fn contains_filter(terms: &[String]) -> Option<(String, Vec<(String, String)>)> {
    if terms.is_empty() {
        return None;
    }

    let mut clauses = Vec::with_capacity(terms.len());
    let mut values = Vec::with_capacity(terms.len());
    for (idx, term) in terms.iter().enumerate() {
        let placeholder = format!(":var{}", idx + 1);
        clauses.push(format!("contains({}, {placeholder})", keys::BUSQUEDA));
        values.push((placeholder, term.clone()));
    }

    Some((clauses.join(" and "), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use empleados_core::empleado::tokenize;

    #[test]
    fn test_find_all_plan() {
        let plan = find_all_plan();

        assert_eq!(plan.key_condition, "hk = :hk");
        assert_eq!(plan.filter, None);
        assert_eq!(plan.index_name, None);
        assert_eq!(
            plan.values,
            vec![(":hk".to_string(), "EMPLEADO".to_string())]
        );
    }

    #[test]
    fn test_find_by_cedula_plan_uses_index_and_eventual_reads() {
        let plan = find_by_cedula_plan("cedula-index", "123");

        assert_eq!(plan.index_name.as_deref(), Some("cedula-index"));
        assert_eq!(plan.key_condition, "cedula = :cedula");
        assert_eq!(plan.consistent_read, Some(false));
        assert_eq!(plan.values, vec![(":cedula".to_string(), "123".to_string())]);
    }

    #[test]
    fn test_search_plan_two_terms() {
        let plan = search_plan(&tokenize("Ana + Lopez"));

        assert_eq!(plan.key_condition, "hk = :hk");
        assert_eq!(
            plan.filter.as_deref(),
            Some("contains(busqueda, :var1) and contains(busqueda, :var2)")
        );
        assert_eq!(
            plan.values,
            vec![
                (":hk".to_string(), "EMPLEADO".to_string()),
                (":var1".to_string(), "ana".to_string()),
                (":var2".to_string(), "lopez".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_plan_without_terms_has_no_filter() {
        let plan = search_plan(&tokenize("   "));

        assert_eq!(plan, find_all_plan());
    }

    #[test]
    fn test_logs_by_owner_plan() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        let plan = logs_by_owner_plan(id);

        assert_eq!(plan.key_condition, "hk = :hk");
        assert_eq!(plan.filter.as_deref(), Some("entidad.codigo = :codigo"));
        assert_eq!(
            plan.values,
            vec![
                (":hk".to_string(), "LOG".to_string()),
                (
                    ":codigo".to_string(),
                    "550e8400-e29b-41d4-a716-446655440001".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_contains_filter_single_term() {
        let (filter, values) = contains_filter(&["ana".to_string()]).unwrap();

        assert_eq!(filter, "contains(busqueda, :var1)");
        assert_eq!(values, vec![(":var1".to_string(), "ana".to_string())]);
        assert!(contains_filter(&[]).is_none());
    }
}
