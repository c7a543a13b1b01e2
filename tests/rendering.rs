use flashdeck::backend::PdfBackend;
use flashdeck::builder::DeckBuilder;
use flashdeck::export::ResourceStore;
#[cfg(feature = "bookmarks")]
use flashdeck::layout::DeckLayout;
use flashdeck::model::{Flashcard, Topic};
use sha2::{Digest, Sha256};

fn sample_deck() -> (Topic, Vec<Flashcard>) {
    let topic = Topic::new()
        .with_name("Biology")
        .with_description("Cells, tissues and the organelles that keep them running");
    let cards = vec![
        Flashcard::new()
            .with_title("Cell")
            .with_question("What is a cell?")
            .with_answer("Basic unit of life."),
        Flashcard::new()
            .with_title("Mitochondria")
            .with_question("Which organelle produces most of the chemical energy of the cell?")
            .with_answer("The mitochondria, through cellular respiration."),
    ];
    (topic, cards)
}

fn render_sample_pdf() -> Vec<u8> {
    let (topic, cards) = sample_deck();
    DeckBuilder::new()
        .render(&PdfBackend::new(), &cards, &topic)
        .expect("render sample pdf")
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    for tag in [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
    ] {
        let start = format!("<{tag}>");
        let end = format!("</{tag}>");
        scrub_xml(&mut normalized, start.as_bytes(), end.as_bytes());
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn renders_pdf_output() {
    let bytes = render_sample_pdf();
    assert!(bytes.starts_with(b"%PDF"), "output should carry a PDF header");
}

#[test]
fn rendering_is_deterministic() {
    let bytes_a = render_sample_pdf();
    let bytes_b = render_sample_pdf();

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn exported_pdf_is_registered_with_its_media_type() {
    let (topic, cards) = sample_deck();
    let mut store = ResourceStore::new();
    let handle = DeckBuilder::new()
        .build_document(&PdfBackend::new(), &cards, &topic, &mut store)
        .expect("build pdf");

    let resource = store.resolve(handle.as_str()).expect("registered");
    assert_eq!(resource.media_type(), "application/pdf");
    assert!(resource.bytes().starts_with(b"%PDF"));
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarked_pdf_keeps_every_page() {
    let (topic, cards) = sample_deck();
    let bytes = DeckBuilder::new()
        .with_bookmarks(true)
        .render(&PdfBackend::new(), &cards, &topic)
        .expect("render bookmarked pdf");

    let document = lopdf::Document::load_mem(&bytes).expect("parse rendered pdf");
    assert_eq!(document.get_pages().len(), 1 + 2 * cards.len());

    let catalog = document
        .trailer
        .get(b"Root")
        .and_then(lopdf::Object::as_reference)
        .and_then(|id| document.get_dictionary(id))
        .expect("catalog");
    assert!(catalog.get(b"Outlines").is_ok());
}

#[cfg(feature = "bookmarks")]
fn page_operations(document: &lopdf::Document, page_id: lopdf::ObjectId) -> Vec<lopdf::content::Operation> {
    let content = document.get_page_content(page_id).expect("page content");
    lopdf::content::Content::decode(&content)
        .expect("decode page content")
        .operations
}

#[cfg(feature = "bookmarks")]
fn operands(operations: &[lopdf::content::Operation], operator: &str) -> Vec<Vec<f64>> {
    operations
        .iter()
        .filter(|operation| operation.operator == operator)
        .map(|operation| {
            operation
                .operands
                .iter()
                .filter_map(|operand| operand.as_float().ok())
                .map(f64::from)
                .collect()
        })
        .collect()
}

#[cfg(feature = "bookmarks")]
fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 0.02,
        "{what}: expected {expected}, found {actual}"
    );
}

#[cfg(feature = "bookmarks")]
#[test]
fn pdf_pages_are_400_by_300_points() {
    let bytes = render_sample_pdf();
    let document = lopdf::Document::load_mem(&bytes).expect("parse rendered pdf");

    for (number, page_id) in document.get_pages() {
        let media_box: Vec<f64> = document
            .get_dictionary(page_id)
            .and_then(|page| page.get(b"MediaBox"))
            .and_then(lopdf::Object::as_array)
            .expect("media box")
            .iter()
            .map(|value| f64::from(value.as_float().expect("numeric media box")))
            .collect();
        assert_eq!(media_box.len(), 4, "page {number}");
        for (actual, expected) in media_box.into_iter().zip([0.0, 0.0, 400.0, 300.0]) {
            assert_close(actual, expected, &format!("page {number} media box"));
        }
    }
}

#[cfg(feature = "bookmarks")]
#[test]
fn text_is_drawn_where_it_was_laid_out() {
    let (topic, cards) = sample_deck();
    let builder = DeckBuilder::new();
    let bytes = builder
        .render(&PdfBackend::new(), &cards, &topic)
        .expect("render sample pdf");
    let document = lopdf::Document::load_mem(&bytes).expect("parse rendered pdf");
    let pages = builder.compose(&cards, &topic);
    assert_eq!(document.get_pages().len(), pages.len());

    for ((number, page_id), page) in document.get_pages().into_iter().zip(&pages) {
        let operations = page_operations(&document, page_id);
        let cursors = operands(&operations, "Td");
        let sizes = operands(&operations, "Tf");
        let blocks: Vec<_> = page.text_blocks().collect();
        assert_eq!(cursors.len(), blocks.len(), "page {number} text count");
        assert_eq!(sizes.len(), blocks.len(), "page {number} font count");

        for ((cursor, size), block) in cursors.iter().zip(&sizes).zip(blocks) {
            assert_close(cursor[0], block.x, &format!("page {number} x of {:?}", block.text));
            assert_close(cursor[1], block.y, &format!("page {number} y of {:?}", block.text));
            assert_close(size[0], block.size, &format!("page {number} size of {:?}", block.text));
        }
    }
}

#[cfg(feature = "bookmarks")]
#[test]
fn fractional_font_sizes_are_not_rounded() {
    let layout = DeckLayout {
        title_font_size: 17.4,
        body_font_size: 13.3,
        ..DeckLayout::default()
    };
    let (topic, cards) = sample_deck();
    let bytes = DeckBuilder::new()
        .with_layout(layout.clone())
        .render(&PdfBackend::for_layout(&layout), &cards, &topic)
        .expect("render pdf");
    let document = lopdf::Document::load_mem(&bytes).expect("parse rendered pdf");

    let pages = document.get_pages();
    let question = pages.get(&2).copied().expect("question page");
    let sizes = operands(&page_operations(&document, question), "Tf");
    assert_close(sizes[0][0], 17.4, "title size");
    assert!(sizes[1..].iter().all(|size| (size[0] - 13.3).abs() < 0.02));
}
