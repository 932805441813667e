//! Column names shared by the five datasets.
//!
//! The CSV headers are in Portuguese; every lookup in the codebase goes
//! through these constants.

pub const INSTITUTION: &str = "Instituicao";
pub const REGION: &str = "Região";
pub const UF: &str = "UF";
pub const STATE: &str = "Estado";
pub const RACE: &str = "CorRaca";
pub const INCOME: &str = "RendaFamiliar";
pub const SEX: &str = "Sexo";
pub const ENROLLMENT: &str = "Número de Matrículas";
pub const YEAR: &str = "Ano";
pub const DROPOUT_RATE: &str = "Taxa de Evasão";
pub const STUDENT_TEACHER_RATIO: &str = "RAP";
pub const BUDGET: &str = "Orçamento";
// Staffing columns; the schema is carried but not charted yet.
pub const POSITION: &str = "Cargo";
pub const CAREER: &str = "Carreira";
