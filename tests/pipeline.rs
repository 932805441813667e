//! End-to-end pipeline tests: temp CSV fixtures through loader and
//! aggregator, the same path the pages take.

use enfermagem_dashboard::data::{columns, AggregateError, Aggregator, DatasetLoader, LoaderError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixtures(dir: &Path, budget_csv: &str) {
    fs::write(
        dir.join("CassificacaoRacialRendaSexo_parte1.csv"),
        "Instituicao;Região;UF;Estado;CorRaca;RendaFamiliar;Sexo;Número de Matrículas\n\
         UFMG;Sudeste;MG;Minas Gerais;Parda;Até 1,5 SM;F;120\n\
         UFRJ;Sudeste;RJ;Rio de Janeiro;Branca;1,5 a 3 SM;M;80\n",
    )
    .unwrap();
    fs::write(
        dir.join("CassificacaoRacialRendaSexo_parte2.csv"),
        "Instituicao;Região;UF;Estado;CorRaca;RendaFamiliar;Sexo;Número de Matrículas\n\
         UFAM;Norte;AM;Amazonas;Preta;Até 1,5 SM;F;60\n\
         UFPE;Nordeste;PE;Pernambuco;Parda;3 a 5 SM;M;40\n",
    )
    .unwrap();
    fs::write(
        dir.join("CargosCarreira.csv"),
        "Cargo,Carreira\nEnfermeiro,Tecnico\nDocente,Magisterio\n",
    )
    .unwrap();
    fs::write(
        dir.join("TaxaEvasao.csv"),
        "Ano,Região,Taxa de Evasão\n2019,Sudeste,12.5\n2020,Norte,15.0\n2020,Sudeste,10.0\n",
    )
    .unwrap();
    fs::write(
        dir.join("RelacaoAlunoProfessorRAP.csv"),
        "Ano,RAP\n2019,14.2\n2020,15.1\n",
    )
    .unwrap();
    fs::write(dir.join("PanoramaOrcamentario.csv"), budget_csv).unwrap();
}

const GOOD_BUDGET: &str =
    "Ano,Região,Orçamento\n2019,Sudeste,1000000\n2020,Norte,800000\n2020,Sudeste,900000\n";

#[test]
fn well_formed_files_yield_five_tables_with_documented_columns() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path(), GOOD_BUDGET);

    let datasets = DatasetLoader::load_all(dir.path()).unwrap();

    for (df, required) in [
        (&datasets.enrollment, columns::ENROLLMENT),
        (&datasets.dropout, columns::DROPOUT_RATE),
        (&datasets.ratio, columns::STUDENT_TEACHER_RATIO),
        (&datasets.budget, columns::BUDGET),
        (&datasets.staffing, columns::POSITION),
    ] {
        assert!(df.height() > 0);
        assert!(df
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == required));
    }
}

#[test]
fn missing_file_yields_single_error_and_no_partial_set() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path(), GOOD_BUDGET);
    fs::remove_file(dir.path().join("TaxaEvasao.csv")).unwrap();

    // The whole load fails; no Datasets value exists for any page.
    let err = DatasetLoader::load_all(dir.path()).unwrap_err();
    assert!(matches!(err, LoaderError::FileNotFound(_)));
}

#[test]
fn grouped_sum_preserves_the_raw_column_total() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path(), GOOD_BUDGET);
    let datasets = DatasetLoader::load_all(dir.path()).unwrap();

    let summary =
        Aggregator::group_sum(&datasets.enrollment, columns::REGION, columns::ENROLLMENT).unwrap();
    let total = Aggregator::column_sum(&datasets.enrollment, columns::ENROLLMENT).unwrap();

    assert_eq!(summary.values.iter().sum::<f64>(), total);
}

#[test]
fn enrollment_total_metric_is_the_unweighted_sum() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path(), GOOD_BUDGET);
    let datasets = DatasetLoader::load_all(dir.path()).unwrap();

    let total = Aggregator::column_sum(&datasets.enrollment, columns::ENROLLMENT).unwrap();
    assert_eq!(total, 120.0 + 80.0 + 60.0 + 40.0);
}

#[test]
fn malformed_budget_column_breaks_only_budget_aggregation() {
    let dir = TempDir::new().unwrap();
    // Budget values that cannot infer as numbers; the column loads as strings.
    write_fixtures(
        dir.path(),
        "Ano,Região,Orçamento\n2019,Sudeste,\"1,2 bi\"\n2020,Norte,\"800 mi\"\n",
    );
    let datasets = DatasetLoader::load_all(dir.path()).unwrap();

    let err =
        Aggregator::group_sum(&datasets.budget, columns::REGION, columns::BUDGET).unwrap_err();
    assert!(matches!(err, AggregateError::NonNumeric(_)));

    // Every other page's aggregation still works.
    assert!(
        Aggregator::group_sum(&datasets.enrollment, columns::REGION, columns::ENROLLMENT).is_ok()
    );
    assert!(Aggregator::group_mean_points(
        &datasets.dropout,
        columns::YEAR,
        columns::DROPOUT_RATE
    )
    .is_ok());
    assert!(Aggregator::xy_points(
        &datasets.ratio,
        columns::YEAR,
        columns::STUDENT_TEACHER_RATIO
    )
    .is_ok());
}

#[test]
fn state_totals_feed_the_map_page() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path(), GOOD_BUDGET);
    let datasets = DatasetLoader::load_all(dir.path()).unwrap();

    let states = Aggregator::state_totals(
        &datasets.enrollment,
        columns::UF,
        columns::STATE,
        columns::ENROLLMENT,
    )
    .unwrap();

    assert_eq!(states.len(), 4);
    let total: f64 = states.iter().map(|s| s.total).sum();
    assert_eq!(total, 300.0);
}
