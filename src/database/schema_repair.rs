//! Auto-reparación de la tabla maintenance_types
//!
//! Una migración antigua pudo dejar `id` como un entero normal y nulable.
//! Antes de insertar una definición se comprueba la columna y, si no es una
//! clave primaria autoincremental de verdad, se reconstruye la tabla:
//!
//! 1. se crea `maintenance_types_rebuild` desde el schema declarado,
//! 2. primera pasada: filas con id conocido, copiadas con su id,
//! 3. segunda pasada: filas sin id, que reciben uno nuevo,
//! 4. se borra la tabla original y se renombra la nueva,
//!
//! todo dentro de una única transacción.

use sqlx::{Connection, FromRow, SqliteConnection};
use std::collections::HashSet;

use super::schema::{TableSchema, MAINTENANCE_TYPES};
use crate::utils::errors::{AppError, AppResult};

const REBUILD_SUFFIX: &str = "_rebuild";

/// Columna tal como la reporta `pragma_table_info`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ColumnInfo {
    pub name: String,
    #[sqlx(rename = "type")]
    pub declared_type: String,
    pub pk: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityStatus {
    Genuine,
    TableMissing,
    MissingColumn,
    /// Existe pero no es alias de rowid (sin PK, PK compuesta o tipo distinto de INTEGER)
    NotAutoIncrementing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealOutcome {
    AlreadyHealthy,
    Created,
    Rebuilt { preserved: usize, assigned: usize },
}

/// Decide si la columna de identidad es un INTEGER PRIMARY KEY real
pub fn assess_identity(columns: &[ColumnInfo], identity: &str) -> IdentityStatus {
    if columns.is_empty() {
        return IdentityStatus::TableMissing;
    }

    let Some(column) = columns.iter().find(|c| c.name.eq_ignore_ascii_case(identity)) else {
        return IdentityStatus::MissingColumn;
    };

    let single_pk = columns.iter().filter(|c| c.pk > 0).count() == 1;
    if column.pk == 1 && single_pk && column.declared_type.trim().eq_ignore_ascii_case("INTEGER") {
        IdentityStatus::Genuine
    } else {
        IdentityStatus::NotAutoIncrementing
    }
}

/// Filas partidas según tengan identidad o no
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityPartition<T> {
    /// Ordenadas por id ascendente
    pub known: Vec<(i64, T)>,
    /// En el orden original
    pub unknown: Vec<T>,
}

/// Separa filas con id de filas sin id.
///
/// Un id repetido sólo lo conserva su primera aparición; las siguientes pasan
/// a la segunda pasada y reciben un id nuevo.
pub fn partition_by_identity<T>(rows: Vec<(Option<i64>, T)>) -> IdentityPartition<T> {
    let mut seen = HashSet::new();
    let mut known = Vec::new();
    let mut unknown = Vec::new();

    for (id, row) in rows {
        match id {
            Some(id) if seen.insert(id) => known.push((id, row)),
            _ => unknown.push(row),
        }
    }

    known.sort_by_key(|(id, _)| *id);
    IdentityPartition { known, unknown }
}

/// Fila de la tabla heredada; los valores se copian tal cual
#[derive(Debug, Clone, PartialEq, FromRow)]
struct LegacyTypeRow {
    id: Option<i64>,
    configuration_id: i64,
    name: String,
    category: String,
    mile_interval: Option<i64>,
    month_interval: Option<i64>,
}

pub async fn inspect_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<ColumnInfo>, sqlx::Error> {
    sqlx::query_as::<_, ColumnInfo>("SELECT name, type, pk FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(&mut *conn)
        .await
}

/// Garantiza que maintenance_types tenga una identidad autoincremental real.
///
/// Debe llamarse fuera de cualquier transacción abierta en `conn`:
/// `PRAGMA foreign_keys` no tiene efecto dentro de una transacción.
pub async fn ensure_maintenance_type_identity(conn: &mut SqliteConnection) -> AppResult<HealOutcome> {
    let schema = &MAINTENANCE_TYPES;
    let identity = schema
        .identity_column()
        .map(|c| c.name)
        .ok_or_else(|| AppError::SchemaRepair("maintenance_types declares no identity".to_string()))?;

    let columns = inspect_columns(conn, schema.name).await?;
    match assess_identity(&columns, identity) {
        IdentityStatus::Genuine => Ok(HealOutcome::AlreadyHealthy),
        IdentityStatus::TableMissing => {
            log::warn!("🛠️ Tabla {} inexistente, creándola", schema.name);
            sqlx::query(&schema.create_sql())
                .execute(&mut *conn)
                .await
                .map_err(|e| AppError::SchemaRepair(e.to_string()))?;
            Ok(HealOutcome::Created)
        }
        status => {
            log::warn!("🛠️ {}.{} no es autoincremental ({:?}), reconstruyendo", schema.name, identity, status);

            sqlx::query("PRAGMA foreign_keys = OFF").execute(&mut *conn).await?;
            let has_identity = status != IdentityStatus::MissingColumn;
            let rebuilt = rebuild_table(conn, schema, identity, has_identity).await;
            let restored = sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await;

            let outcome = rebuilt.map_err(|e| AppError::SchemaRepair(e.to_string()))?;
            restored?;

            if let HealOutcome::Rebuilt { preserved, assigned } = outcome {
                log::info!("✅ {} reconstruida: {} ids conservados, {} ids nuevos", schema.name, preserved, assigned);
            }
            Ok(outcome)
        }
    }
}

/// Sin columna de identidad todas las filas van a la segunda pasada
async fn rebuild_table(
    conn: &mut SqliteConnection,
    schema: &TableSchema,
    identity: &str,
    has_identity: bool,
) -> Result<HealOutcome, sqlx::Error> {
    let rebuild_name = format!("{}{}", schema.name, REBUILD_SUFFIX);
    let data_columns = schema.data_columns().join(", ");
    let placeholders = vec!["?"; schema.data_columns().len()].join(", ");

    let mut tx = conn.begin().await?;

    sqlx::query(&format!("DROP TABLE IF EXISTS {}", rebuild_name))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&schema.create_sql_as(&rebuild_name))
        .execute(&mut *tx)
        .await?;

    let identity_expr = if has_identity { identity } else { "NULL" };
    let rows = sqlx::query_as::<_, LegacyTypeRow>(&format!(
        "SELECT {} AS id, {} FROM {} ORDER BY rowid",
        identity_expr, data_columns, schema.name
    ))
    .fetch_all(&mut *tx)
    .await?;

    let partition = partition_by_identity(rows.into_iter().map(|r| (r.id, r)).collect());
    let preserved = partition.known.len();
    let assigned = partition.unknown.len();

    let with_id = format!(
        "INSERT INTO {} ({}, {}) VALUES (?, {})",
        rebuild_name, identity, data_columns, placeholders
    );
    for (id, row) in &partition.known {
        sqlx::query(&with_id)
            .bind(id)
            .bind(row.configuration_id)
            .bind(&row.name)
            .bind(&row.category)
            .bind(row.mile_interval)
            .bind(row.month_interval)
            .execute(&mut *tx)
            .await?;
    }

    let without_id = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        rebuild_name, data_columns, placeholders
    );
    for row in &partition.unknown {
        sqlx::query(&without_id)
            .bind(row.configuration_id)
            .bind(&row.name)
            .bind(&row.category)
            .bind(row.mile_interval)
            .bind(row.month_interval)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query(&format!("DROP TABLE {}", schema.name))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!("ALTER TABLE {} RENAME TO {}", rebuild_name, schema.name))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(HealOutcome::Rebuilt { preserved, assigned })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, declared_type: &str, pk: i64) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            pk,
        }
    }

    #[test]
    fn test_assess_genuine_identity() {
        let columns = vec![column("id", "INTEGER", 1), column("name", "TEXT", 0)];
        assert_eq!(assess_identity(&columns, "id"), IdentityStatus::Genuine);
    }

    #[test]
    fn test_assess_plain_nullable_integer() {
        let columns = vec![column("id", "INTEGER", 0), column("name", "TEXT", 0)];
        assert_eq!(assess_identity(&columns, "id"), IdentityStatus::NotAutoIncrementing);
    }

    #[test]
    fn test_assess_int_primary_key_is_not_rowid_alias() {
        let columns = vec![column("id", "INT", 1)];
        assert_eq!(assess_identity(&columns, "id"), IdentityStatus::NotAutoIncrementing);

        let composite = vec![column("id", "INTEGER", 1), column("name", "TEXT", 2)];
        assert_eq!(assess_identity(&composite, "id"), IdentityStatus::NotAutoIncrementing);
    }

    #[test]
    fn test_assess_missing_table_and_column() {
        assert_eq!(assess_identity(&[], "id"), IdentityStatus::TableMissing);
        assert_eq!(
            assess_identity(&[column("name", "TEXT", 0)], "id"),
            IdentityStatus::MissingColumn
        );
    }

    #[test]
    fn test_partition_keeps_known_ids_sorted() {
        let partition = partition_by_identity(vec![
            (Some(5), "e"),
            (None, "x"),
            (Some(1), "a"),
            (None, "y"),
        ]);
        assert_eq!(partition.known, vec![(1, "a"), (5, "e")]);
        assert_eq!(partition.unknown, vec!["x", "y"]);
    }

    #[test]
    fn test_partition_sends_repeated_ids_to_second_pass() {
        let partition = partition_by_identity(vec![(Some(2), "first"), (Some(2), "second")]);
        assert_eq!(partition.known, vec![(2, "first")]);
        assert_eq!(partition.unknown, vec!["second"]);
    }
}
