//! DOCX serialization of a flow document.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Pic, Run as DocxRun};

use crate::error::{Error, Result};
use crate::flow::{FlowBlock, FlowDocument, InlineImage, Run};

/// MIME type of the rendered output.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Serialize a flow document as a DOCX byte buffer.
pub fn to_docx(flow: &FlowDocument) -> Result<Vec<u8>> {
    let mut docx = Docx::new();

    for block in &flow.blocks {
        match block {
            FlowBlock::Paragraph(runs) => {
                let mut paragraph = Paragraph::new();
                for run in runs {
                    paragraph = paragraph.add_run(render_run(run));
                }
                docx = docx.add_paragraph(paragraph);
            }
            FlowBlock::Image(image) => {
                docx = docx.add_paragraph(render_image(image));
            }
            FlowBlock::PageBreak => {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(DocxRun::new().add_break(BreakType::Page)),
                );
            }
        }
    }

    let mut buffer = Vec::new();
    docx.build()
        .pack(&mut Cursor::new(&mut buffer))
        .map_err(|e| Error::TargetWrite(e.to_string()))?;

    Ok(buffer)
}

fn render_run(run: &Run) -> DocxRun {
    // DOCX measures font size in half-points.
    let half_points = (run.font_size * 2.0).round() as usize;
    let mut out = DocxRun::new().add_text(run.text.clone()).size(half_points);

    if run.bold {
        out = out.bold();
    }
    if run.italic {
        out = out.italic();
    }
    if let Some(color) = run.color {
        out = out.color(color.to_hex());
    }

    out
}

fn render_image(image: &InlineImage) -> Paragraph {
    let pic = Pic::new(&image.data).size(image.width_emu, image.height_emu);
    Paragraph::new().add_run(DocxRun::new().add_image(pic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowDocument;
    use crate::model::Rgb;

    #[test]
    fn test_render_produces_zip() {
        let mut flow = FlowDocument::new();
        let mut run = Run::new("Hello", 24.0);
        run.bold = true;
        run.color = Some(Rgb(255, 0, 0));
        flow.push_run(run);
        flow.push(FlowBlock::PageBreak);
        flow.push_run(Run::new("World", 11.0));

        let bytes = to_docx(&flow).unwrap();
        // DOCX is a ZIP container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_empty_document() {
        let bytes = to_docx(&FlowDocument::new()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
