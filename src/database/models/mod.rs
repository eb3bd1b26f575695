pub mod catalog;
pub mod client;
pub mod column;
pub mod daily_log;
pub mod document;
pub mod project;
pub mod schema;
pub mod team;
pub mod user;

pub use column::{ColumnDef, ColumnType, DefaultValue};
pub use schema::{EntitySchema, OrderBy, Projection, SortDirection};
pub use team::ProjectTeamMember;
pub use user::User;

/// Every entity served by the generic `/<entity>` routes.
pub static ENTITIES: &[&EntitySchema] = &[
    &catalog::SUPPLIERS,
    &catalog::COST_CATEGORIES,
    &catalog::UNITS_OF_MEASURE,
    &client::CLIENTS,
    &team::TEAM_MEMBERS,
    &project::PROJECTS,
    &project::PROJECT_SERVICES,
    &document::PROJECT_DOCUMENTS,
    &document::DOCUMENT_VERSIONS,
    &daily_log::DAILY_LOGS,
    &daily_log::DAILY_LOG_ACTIVITIES,
    &daily_log::DAILY_LOG_COSTS,
    &daily_log::DAILY_LOG_PHOTOS,
];

pub fn find_entity(name: &str) -> Option<&'static EntitySchema> {
    ENTITIES.iter().copied().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_registered_entities() {
        assert_eq!(find_entity("projects").map(|e| e.label), Some("Project"));
        assert!(find_entity("users").is_none());
        assert!(find_entity("project_team_members").is_none());
    }

    #[test]
    fn every_entity_has_a_required_column_and_an_order() {
        for entity in ENTITIES {
            assert!(entity.required_columns().next().is_some(), "{}", entity.name);
            assert!(!entity.order.is_empty(), "{}", entity.name);
        }
    }

    #[test]
    fn filters_reference_declared_uuid_columns() {
        for entity in ENTITIES {
            for filter in entity.filters {
                let column = entity.column(filter).expect(filter);
                assert_eq!(column.column_type, ColumnType::Uuid);
            }
        }
    }

    #[test]
    fn doc_type_alias_resolves_to_type_column() {
        let docs = find_entity("project_documents").unwrap();
        assert_eq!(docs.column("doc_type").map(|c| c.name), Some("type"));
        assert_eq!(docs.column("type").map(|c| c.name), Some("type"));
        assert!(docs.column("id").is_none());
    }
}
