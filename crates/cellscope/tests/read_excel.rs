// End-to-end extraction over real xlsx files written with umya.
use cellscope::tool::{ReadExcelArgs, execute, read_excel};
use cellscope::{RangeSpec, ReadError, ReadOptions, read_workbook};
use cellscope_testkit::{XlsxFixture, build_workbook};
use serde_json::{Value, json};

fn people() -> XlsxFixture {
    build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut("A1").set_value("Name");
        sh.get_cell_mut("A1")
            .get_style_mut()
            .get_font_mut()
            .set_bold(true);
        sh.get_cell_mut("B1").set_value("Age");
        sh.get_cell_mut("A2").set_value("Amy");
        sh.get_cell_mut("B2").set_value_number(30);
    })
}

#[test]
fn json_people_example() {
    let book = people();
    let out = read_workbook(book.path(), &ReadOptions::from_strings("vb", "j", "")).unwrap();
    assert_eq!(
        out,
        concat!(
            r#"{"Sheet1":{"cells":["#,
            r#"{"row":1,"col":1,"value":"Name","bold":true},"#,
            r#"{"row":1,"col":2,"value":"Age","bold":false},"#,
            r#"{"row":2,"col":1,"value":"Amy","bold":false},"#,
            r#"{"row":2,"col":2,"value":"30","bold":false}]}}"#
        )
    );
}

#[test]
fn text_people_example() {
    let book = people();
    let out = read_workbook(book.path(), &ReadOptions::from_strings("vb", "t", "")).unwrap();
    assert_eq!(
        out,
        ">Sheet1\nc\t1\t1\tName\t1\nc\t1\t2\tAge\t0\nc\t2\t1\tAmy\t0\nc\t2\t2\t30\t0"
    );
}

#[test]
fn formula_cells_carry_their_text_and_flag() {
    let book = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut("A1").set_value_number(2);
        sh.get_cell_mut("A2").set_formula("A1*2");
    });
    let out = read_workbook(book.path(), &ReadOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&out).unwrap();
    let cells = doc["Sheet1"]["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 2);
    assert!(cells[0].get("formula").is_none());
    assert_eq!(cells[1]["value"], "=A1*2");
    assert_eq!(cells[1]["formula"], true);
}

#[test]
fn sparse_and_dense_counts() {
    let book = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut("A1").set_value("a");
        sh.get_cell_mut("C2").set_value("b");
    });
    let count = |sparse: bool| {
        let out = read_workbook(
            book.path(),
            &ReadOptions::from_strings("v", "j", "").with_sparse(sparse),
        )
        .unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();
        doc["Sheet1"]["cells"].as_array().unwrap().len()
    };
    assert_eq!(count(true), 2);
    // rows 1..=2 by cols 1..=3
    assert_eq!(count(false), 6);
}

#[test]
fn explicit_range_and_used_range_agree() {
    let book = people();
    let opts = ReadOptions::from_strings("v", "t", "");
    let implicit = read_workbook(book.path(), &opts).unwrap();
    let explicit = read_workbook(
        book.path(),
        &opts.clone().with_range(RangeSpec::from_sentinels(1, 2, 1, 2)),
    )
    .unwrap();
    assert_eq!(implicit, explicit);

    let second_row = read_workbook(
        book.path(),
        &opts.with_range(RangeSpec::from_sentinels(2, 0, 0, 0)),
    )
    .unwrap();
    assert_eq!(second_row, ">Sheet1\nc\t2\t1\tAmy\nc\t2\t2\t30");
}

#[test]
fn sheet_selection_follows_caller_order() {
    let book = build_workbook(|book| {
        let _ = book.new_sheet("Data");
        book.get_sheet_by_name_mut("Sheet1")
            .unwrap()
            .get_cell_mut("A1")
            .set_value("one");
        book.get_sheet_by_name_mut("Data")
            .unwrap()
            .get_cell_mut("B2")
            .set_value("two");
    });
    let out = read_workbook(
        book.path(),
        &ReadOptions::from_strings("v", "t", "Data, Nope ,Sheet1"),
    )
    .unwrap();
    assert_eq!(out, ">Data\nc\t2\t2\ttwo\n>Sheet1\nc\t1\t1\tone");

    let none = read_workbook(book.path(), &ReadOptions::from_strings("v", "j", "Nope")).unwrap();
    assert_eq!(none, "{}");
}

#[test]
fn fill_color_and_bold_projection() {
    let book = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut("A1").set_value("hot");
        sh.get_cell_mut("A1")
            .get_style_mut()
            .set_background_color("FFFFFF00");
    });
    let out = read_workbook(book.path(), &ReadOptions::from_strings("gb", "j", "")).unwrap();
    assert_eq!(
        out,
        r#"{"Sheet1":{"cells":[{"row":1,"col":1,"bold":false,"fill_color":"FFFFFF00"}]}}"#
    );
}

#[test]
fn booleans_render_capitalized() {
    let book = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut("A1").set_value_bool(true);
        sh.get_cell_mut("B1").set_value_bool(false);
    });
    let json = read_workbook(book.path(), &ReadOptions::from_strings("v", "j", "")).unwrap();
    assert_eq!(
        json,
        r#"{"Sheet1":{"cells":[{"row":1,"col":1,"value":"True"},{"row":1,"col":2,"value":"False"}]}}"#
    );
    let text = read_workbook(book.path(), &ReadOptions::from_strings("v", "t", "")).unwrap();
    assert_eq!(text, ">Sheet1\nc\t1\t1\tTrue\nc\t1\t2\tFalse");
}

#[test]
fn dates_and_default_fonts_end_to_end() {
    let book = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut("A1")
            .set_value_number(45306)
            .get_style_mut()
            .get_number_format_mut()
            .set_format_code("yyyy-mm-dd");
        sh.get_cell_mut("B1").set_value("plain");
    });
    let json = read_workbook(book.path(), &ReadOptions::from_strings("vnz", "j", "")).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"Sheet1":{"cells":["#,
            r#"{"row":1,"col":1,"value":"2024-01-15 00:00:00","font_name":"Calibri","font_size":11.0},"#,
            r#"{"row":1,"col":2,"value":"plain","font_name":"Calibri","font_size":11.0}]}}"#
        )
    );
    let text = read_workbook(book.path(), &ReadOptions::from_strings("vnz", "t", "")).unwrap();
    assert_eq!(
        text,
        ">Sheet1\nc\t1\t1\t2024-01-15 00:00:00\tCalibri\t11.0\nc\t1\t2\tplain\tCalibri\t11.0"
    );
}

#[test]
fn tool_reports_missing_file_as_text() {
    let out = read_excel(&ReadExcelArgs::new("/definitely/not/here.xlsx")).unwrap();
    assert_eq!(out, "error: file not found: /definitely/not/here.xlsx");
}

#[test]
fn tool_execute_over_real_file() {
    let book = people();
    let out = execute(&json!({
        "filepath": book.path_str(),
        "out": "v",
        "fmt": "t",
        "row_start": 1,
        "row_end": 1,
    }))
    .unwrap();
    assert_eq!(out, ">Sheet1\nc\t1\t1\tName\nc\t1\t2\tAge");
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b\n").unwrap();
    let err = read_workbook(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, ReadError::Io(_)));
}
