//! One-page PDFs built with lopdf for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// First page text of a well-formed bill.
pub(crate) const BILL_LINES: [&str; 4] = [
    "CFE SUMINISTRADOR DE SERVICIOS BASICOS",
    "NO. DE SERVICIO:441000800801",
    "LÍMITE DE PAGO:29 JUN 25",
    "PERIODO FACTURADO:10 ABR 25-11 JUN 25",
];

/// A single page showing `lines` in Courier, one text object per line.
pub(crate) fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
        operations.push(Operation::new("Td", vec![72.into(), (700 - 20 * i as i64).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]));
        operations.push(Operation::new("ET", vec![]));
    }
    build(operations, true)
}

/// A page that shows text without ever selecting a font.
pub(crate) fn pdf_without_font(line: &str) -> Vec<u8> {
    build(
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]),
            Operation::new("ET", vec![]),
        ],
        false,
    )
}

fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u8).collect()
}

fn build(operations: Vec<Operation>, with_font: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let resources = if with_font {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        dictionary! { "Font" => dictionary! { "F1" => font_id } }
    } else {
        dictionary! {}
    };
    let resources_id = doc.add_object(resources);

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
