//! Schema declarado
//!
//! Las tablas se describen como datos y el DDL se genera a partir de ellas.
//! La reparación de `maintenance_types` usa la misma declaración para crear
//! la tabla de reemplazo, así que nunca hay dos versiones del schema.

/// Tipo de columna SQLite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// INTEGER PRIMARY KEY AUTOINCREMENT (alias de rowid)
    Identity,
    Integer,
    Real,
    Text,
    Date,
    Timestamp,
}

impl ColumnType {
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Identity => "INTEGER PRIMARY KEY AUTOINCREMENT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "DATETIME",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    const fn required(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type, nullable: false, references: None }
    }

    const fn optional(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type, nullable: true, references: None }
    }

    const fn foreign(name: &'static str, table: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Integer,
            nullable: false,
            references: Some(ForeignKey { table, column: "id" }),
        }
    }

    fn render(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.column_type.sql());
        if !self.nullable && self.column_type != ColumnType::Identity {
            sql.push_str(" NOT NULL");
        }
        if let Some(fk) = self.references {
            sql.push_str(&format!(" REFERENCES {}({})", fk.table, fk.column));
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub unique: &'static [&'static [&'static str]],
}

impl TableSchema {
    pub fn identity_column(&self) -> Option<&ColumnDef> {
        self.columns
            .iter()
            .find(|c| c.column_type == ColumnType::Identity)
    }

    /// Columnas que no son la identidad, en orden de declaración
    pub fn data_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.column_type != ColumnType::Identity)
            .map(|c| c.name)
            .collect()
    }

    pub fn create_sql(&self) -> String {
        self.render_create(self.name, true)
    }

    /// DDL de la misma tabla bajo otro nombre (tabla de reemplazo)
    pub fn create_sql_as(&self, table_name: &str) -> String {
        self.render_create(table_name, false)
    }

    fn render_create(&self, table_name: &str, if_not_exists: bool) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDef::render).collect();
        for columns in self.unique {
            parts.push(format!("UNIQUE ({})", columns.join(", ")));
        }
        format!(
            "CREATE TABLE {}{} (\n    {}\n)",
            if if_not_exists { "IF NOT EXISTS " } else { "" },
            table_name,
            parts.join(",\n    ")
        )
    }
}

pub const VEHICLE_CONFIGURATIONS: TableSchema = TableSchema {
    name: "vehicle_configurations",
    columns: &[
        ColumnDef::required("id", ColumnType::Identity),
        ColumnDef::required("brand", ColumnType::Text),
        ColumnDef::required("model", ColumnType::Text),
        ColumnDef::required("year", ColumnType::Integer),
        ColumnDef::required("engine_type", ColumnType::Text),
        ColumnDef::required("transmission_type", ColumnType::Text),
    ],
    unique: &[&["brand", "model", "year", "engine_type", "transmission_type"]],
};

pub const VEHICLES: TableSchema = TableSchema {
    name: "vehicles",
    columns: &[
        ColumnDef::required("id", ColumnType::Identity),
        ColumnDef::required("alias", ColumnType::Text),
        ColumnDef::foreign("configuration_id", "vehicle_configurations"),
    ],
    unique: &[],
};

/// Sin UNIQUE: SQLite trata NULL como distinto; la unicidad la impone el guard
pub const MAINTENANCE_TYPES: TableSchema = TableSchema {
    name: "maintenance_types",
    columns: &[
        ColumnDef::required("id", ColumnType::Identity),
        ColumnDef::foreign("configuration_id", "vehicle_configurations"),
        ColumnDef::required("name", ColumnType::Text),
        ColumnDef::required("category", ColumnType::Text),
        ColumnDef::optional("mile_interval", ColumnType::Integer),
        ColumnDef::optional("month_interval", ColumnType::Integer),
    ],
    unique: &[],
};

pub const OBSERVATIONS: TableSchema = TableSchema {
    name: "observations",
    columns: &[
        ColumnDef::required("id", ColumnType::Identity),
        ColumnDef::foreign("vehicle_id", "vehicles"),
        ColumnDef::required("observed_on", ColumnType::Date),
        ColumnDef::required("reading", ColumnType::Integer),
    ],
    unique: &[&["vehicle_id", "observed_on", "reading"]],
};

pub const MECHANICS: TableSchema = TableSchema {
    name: "mechanics",
    columns: &[
        ColumnDef::required("id", ColumnType::Identity),
        ColumnDef::required("name", ColumnType::Text),
        ColumnDef::required("phone", ColumnType::Text),
    ],
    unique: &[&["name", "phone"]],
};

pub const MAINTENANCE_RECORDS: TableSchema = TableSchema {
    name: "maintenance_records",
    columns: &[
        ColumnDef::required("id", ColumnType::Identity),
        ColumnDef::foreign("vehicle_id", "vehicles"),
        ColumnDef::foreign("maintenance_type_id", "maintenance_types"),
        ColumnDef::foreign("observation_id", "observations"),
        ColumnDef::foreign("mechanic_id", "mechanics"),
        ColumnDef::required("price", ColumnType::Real),
        ColumnDef::optional("next_due_date", ColumnType::Date),
        ColumnDef::optional("next_due_reading", ColumnType::Integer),
        ColumnDef::optional("notes", ColumnType::Text),
        ColumnDef::required("created_at", ColumnType::Timestamp),
    ],
    unique: &[&["vehicle_id", "maintenance_type_id", "observation_id"]],
};

/// Orden de creación (las referencias apuntan siempre hacia atrás)
pub const ALL_TABLES: [&TableSchema; 6] = [
    &VEHICLE_CONFIGURATIONS,
    &VEHICLES,
    &MAINTENANCE_TYPES,
    &OBSERVATIONS,
    &MECHANICS,
    &MAINTENANCE_RECORDS,
];
