//! Extension dispatch and the single-column fallbacks

use super::{integers, names, strings};
use crate::decoder::{BYTES_COLUMN, HTML_COLUMN, TEXT_COLUMN, decode, decode_file};
use crate::error::IntakeError;
use crate::models::{FileFormat, RawFile};

#[test]
fn test_text_lines_become_rows() {
    for name in ["notas.txt", "servidor.log", "LEEME.md"] {
        let table = decode(name, b"a\nb\nc").unwrap();
        assert_eq!(names(&table), vec![TEXT_COLUMN]);
        assert_eq!(
            strings(&table, TEXT_COLUMN),
            vec![
                Some("a".to_string()),
                Some("b".to_string()),
                Some("c".to_string())
            ]
        );
    }
}

#[test]
fn test_text_handles_crlf_and_invalid_utf8() {
    let table = decode("registro.txt", b"linea 1\r\nlinea \xff2\r\n").unwrap();
    let rows = strings(&table, TEXT_COLUMN);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].as_deref(), Some("linea 1"));
    assert!(rows[1].as_deref().unwrap().starts_with("linea "));
}

#[test]
fn test_empty_text_keeps_its_column() {
    let table = decode("vacio.txt", b"").unwrap();
    assert_eq!(names(&table), vec![TEXT_COLUMN]);
    assert_eq!(table.height(), 0);
}

#[test]
fn test_html_is_a_single_row() {
    let html = b"<html>\n<body>Informe</body>\n</html>";
    let table = decode("portada.HTM", html).unwrap();
    assert_eq!(names(&table), vec![HTML_COLUMN]);
    assert_eq!(table.height(), 1);
    assert_eq!(
        strings(&table, HTML_COLUMN)[0].as_deref(),
        Some("<html>\n<body>Informe</body>\n</html>")
    );
}

#[test]
fn test_unknown_extension_keeps_raw_bytes() {
    let table = decode("firma.bin", b"\x00\x01").unwrap();
    assert_eq!(names(&table), vec![BYTES_COLUMN]);
    assert_eq!(table.height(), 1);

    let column = table.column(BYTES_COLUMN).unwrap().as_materialized_series();
    assert_eq!(column.binary().unwrap().get(0), Some(&b"\x00\x01"[..]));
}

#[test]
fn test_missing_extension_is_binary() {
    let table = decode("LICENCIA", b"texto plano").unwrap();
    assert_eq!(names(&table), vec![BYTES_COLUMN]);
}

#[test]
fn test_csv_with_header() {
    let csv = b"fecha,participantes,area\n2025-03-10,20,Comunicaciones\n2025-04-01,35,Comunicaciones\n";
    let table = decode("social_abril.csv", csv).unwrap();

    assert_eq!(names(&table), vec!["fecha", "participantes", "area"]);
    assert_eq!(table.height(), 2);
    assert_eq!(integers(&table, "participantes"), vec![Some(20), Some(35)]);
}

#[test]
fn test_csv_type_change_after_many_rows() {
    let mut csv = String::from("id,valor,estado\n");
    for i in 0..150 {
        csv.push_str(&format!("{},{},{}\n", i, i * 10, i));
    }
    csv.push_str("150,2.5,n/d\n");

    let table = decode("ambiental_largo.csv", csv.as_bytes()).unwrap();
    assert_eq!(table.height(), 151);
    assert_eq!(
        table.column("valor").unwrap().dtype(),
        &polars::prelude::DataType::Float64
    );
    assert_eq!(strings(&table, "estado")[150].as_deref(), Some("n/d"));
}

#[test]
fn test_csv_duplicate_and_blank_headers() {
    let table = decode("repetidos.csv", b"a,a,,b\n1,2,3,4\n5,6,7,8\n").unwrap();
    assert_eq!(names(&table), vec!["a", "a.1", "Unnamed: 2", "b"]);
    assert_eq!(integers(&table, "a.1"), vec![Some(2), Some(6)]);
}

#[test]
fn test_csv_extension_is_case_insensitive() {
    let table = decode("DATOS.CSV", b"a,b\n1,2\n").unwrap();
    assert_eq!(names(&table), vec!["a", "b"]);
}

#[test]
fn test_empty_csv_is_a_decode_error() {
    let err = decode("vacio.csv", b"").unwrap_err();
    match err {
        IntakeError::Decode {
            filename, format, ..
        } => {
            assert_eq!(filename, "vacio.csv");
            assert_eq!(format, FileFormat::Csv);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_spreadsheet_is_a_decode_error() {
    let err = decode("indicadores.xlsx", b"not a zip archive").unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Decode {
            format: FileFormat::Spreadsheet,
            ..
        }
    ));
}

#[test]
fn test_decode_file_uses_raw_extension() {
    let raw = RawFile::new("Informe.TXT", b"uno\ndos".to_vec());
    let table = decode_file(&raw).unwrap();
    assert_eq!(table.height(), 2);
}

#[test]
fn test_well_formed_inputs_have_a_column() {
    let samples: [(&str, &[u8]); 6] = [
        ("a.csv", b"x,y\n1,2\n"),
        ("a.json", br#"[{"x": 1}]"#),
        ("a.txt", b"hola"),
        ("a.log", b""),
        ("a.html", b"<p></p>"),
        ("a.dat", b"\x10\x20"),
    ];

    for (name, content) in samples {
        let table = decode(name, content).unwrap();
        assert!(table.width() >= 1, "{name} produced no columns");
    }
}
