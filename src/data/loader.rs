//! Dataset Loader Module
//! Reads the five fixed CSV datasets with Polars. Loaded once per session;
//! the resulting [`Datasets`] value is immutable afterwards.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Directory holding the CSV files, relative to the working directory.
pub const DATA_DIR: &str = "data";

/// The enrollment file ships split in two parts, semicolon-separated.
const ENROLLMENT_PARTS: [&str; 2] = [
    "CassificacaoRacialRendaSexo_parte1.csv",
    "CassificacaoRacialRendaSexo_parte2.csv",
];
const STAFFING_FILE: &str = "CargosCarreira.csv";
const DROPOUT_FILE: &str = "TaxaEvasao.csv";
const RATIO_FILE: &str = "RelacaoAlunoProfessorRAP.csv";
const BUDGET_FILE: &str = "PanoramaOrcamentario.csv";

const COMMA: u8 = b',';
const SEMICOLON: u8 = b';';

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),
    #[error("failed to read {name}: {source}")]
    Csv { name: String, source: PolarsError },
}

/// The five datasets. Loaded wholesale into memory; never mutated after load.
#[derive(Debug, Clone)]
pub struct Datasets {
    /// Enrollment by race/income/sex per institution.
    pub enrollment: DataFrame,
    /// Staffing records (position/career).
    pub staffing: DataFrame,
    /// Dropout rate per year and region.
    pub dropout: DataFrame,
    /// Student-teacher ratio per year.
    pub ratio: DataFrame,
    /// Budget per year and region.
    pub budget: DataFrame,
}

/// Handles CSV file loading with Polars.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load all five datasets from `base`.
    ///
    /// Any single failure fails the whole load; callers never see a
    /// partial set. The files are read in parallel.
    pub fn load_all(base: &Path) -> Result<Datasets, LoaderError> {
        let ((enrollment, staffing), (dropout, (ratio, budget))) = rayon::join(
            || {
                rayon::join(
                    || Self::load_split(base, "enrollment", &ENROLLMENT_PARTS, SEMICOLON),
                    || Self::load_file(base, "staffing", STAFFING_FILE, COMMA),
                )
            },
            || {
                rayon::join(
                    || Self::load_file(base, "dropout", DROPOUT_FILE, COMMA),
                    || {
                        rayon::join(
                            || Self::load_file(base, "ratio", RATIO_FILE, COMMA),
                            || Self::load_file(base, "budget", BUDGET_FILE, COMMA),
                        )
                    },
                )
            },
        );

        let datasets = Datasets {
            enrollment: enrollment?,
            staffing: staffing?,
            dropout: dropout?,
            ratio: ratio?,
            budget: budget?,
        };

        info!(
            enrollment_rows = datasets.enrollment.height(),
            staffing_rows = datasets.staffing.height(),
            dropout_rows = datasets.dropout.height(),
            ratio_rows = datasets.ratio.height(),
            budget_rows = datasets.budget.height(),
            "all datasets loaded"
        );

        Ok(datasets)
    }

    fn load_file(
        base: &Path,
        name: &str,
        file: &str,
        separator: u8,
    ) -> Result<DataFrame, LoaderError> {
        let df = Self::read_csv(&base.join(file), separator)?;
        info!(dataset = name, rows = df.height(), "dataset loaded");
        Ok(df)
    }

    /// Load a two-part CSV and concatenate the parts vertically.
    fn load_split(
        base: &Path,
        name: &str,
        parts: &[&str; 2],
        separator: u8,
    ) -> Result<DataFrame, LoaderError> {
        let first = Self::read_csv(&base.join(parts[0]), separator)?;
        let second = Self::read_csv(&base.join(parts[1]), separator)?;
        let df = first.vstack(&second).map_err(|source| LoaderError::Csv {
            name: name.to_string(),
            source,
        })?;
        info!(dataset = name, rows = df.height(), "dataset loaded");
        Ok(df)
    }

    fn read_csv(path: &Path, separator: u8) -> Result<DataFrame, LoaderError> {
        match std::fs::metadata(path) {
            Err(_) => return Err(LoaderError::FileNotFound(path.to_path_buf())),
            Ok(meta) if meta.len() == 0 => return Err(LoaderError::EmptyFile(path.to_path_buf())),
            Ok(_) => {}
        }

        let df = LazyCsvReader::new(path.to_path_buf())
            .with_separator(separator)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Csv {
                name: path.display().to_string(),
                source,
            })?;

        if df.height() == 0 {
            return Err(LoaderError::EmptyFile(path.to_path_buf()));
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns;
    use std::fs;
    use tempfile::TempDir;

    fn write_fixtures(dir: &Path) {
        fs::write(
            dir.join(ENROLLMENT_PARTS[0]),
            "Instituicao;Região;UF;Estado;CorRaca;RendaFamiliar;Sexo;Número de Matrículas\n\
             UFMG;Sudeste;MG;Minas Gerais;Parda;Até 1,5 SM;F;120\n\
             UFRJ;Sudeste;RJ;Rio de Janeiro;Branca;1,5 a 3 SM;M;80\n",
        )
        .unwrap();
        fs::write(
            dir.join(ENROLLMENT_PARTS[1]),
            "Instituicao;Região;UF;Estado;CorRaca;RendaFamiliar;Sexo;Número de Matrículas\n\
             UFAM;Norte;AM;Amazonas;Preta;Até 1,5 SM;F;60\n\
             UFPE;Nordeste;PE;Pernambuco;Parda;3 a 5 SM;M;40\n",
        )
        .unwrap();
        fs::write(
            dir.join(STAFFING_FILE),
            "Cargo,Carreira\nEnfermeiro,Tecnico\nDocente,Magisterio\n",
        )
        .unwrap();
        fs::write(
            dir.join(DROPOUT_FILE),
            "Ano,Região,Taxa de Evasão\n2019,Sudeste,12.5\n2020,Norte,15.0\n2020,Sudeste,10.0\n",
        )
        .unwrap();
        fs::write(dir.join(RATIO_FILE), "Ano,RAP\n2019,14.2\n2020,15.1\n").unwrap();
        fs::write(
            dir.join(BUDGET_FILE),
            "Ano,Região,Orçamento\n2019,Sudeste,1000000\n2020,Norte,800000\n",
        )
        .unwrap();
    }

    #[test]
    fn loads_five_non_empty_tables() {
        let dir = TempDir::new().unwrap();
        write_fixtures(dir.path());

        let datasets = DatasetLoader::load_all(dir.path()).unwrap();

        assert!(datasets.enrollment.height() > 0);
        assert!(datasets.staffing.height() > 0);
        assert!(datasets.dropout.height() > 0);
        assert!(datasets.ratio.height() > 0);
        assert!(datasets.budget.height() > 0);

        let names: Vec<String> = datasets
            .enrollment
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(names.contains(&columns::REGION.to_string()));
        assert!(names.contains(&columns::ENROLLMENT.to_string()));
    }

    #[test]
    fn enrollment_parts_are_concatenated() {
        let dir = TempDir::new().unwrap();
        write_fixtures(dir.path());

        let datasets = DatasetLoader::load_all(dir.path()).unwrap();
        // Two rows in each part.
        assert_eq!(datasets.enrollment.height(), 4);
    }

    #[test]
    fn missing_file_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        write_fixtures(dir.path());
        fs::remove_file(dir.path().join(BUDGET_FILE)).unwrap();

        let err = DatasetLoader::load_all(dir.path()).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_fixtures(dir.path());
        fs::write(dir.path().join(RATIO_FILE), "").unwrap();

        let err = DatasetLoader::load_all(dir.path()).unwrap_err();
        assert!(matches!(err, LoaderError::EmptyFile(_)));
    }
}
