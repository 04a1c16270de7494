use anyhow::{bail, Context};
use std::fs;
use std::path::Path;

const BYTES_PER_LINE: usize = 16;

/// Renders a C source file with the blob bytes as a hex array literal and an
/// LVGL `lv_img_dsc_t` constant describing it. The descriptor dimensions are
/// taken verbatim from the arguments and are never derived from the blob
/// length; `data_size` is always the `sizeof` of the emitted array.
pub fn render_image_dsc(
    data: &[u8],
    blob_name: &str,
    var_name: &str,
    width: u32,
    height: u32,
) -> String {
    let var_upper = var_name.to_uppercase();

    let mut map = String::with_capacity(data.len() * 6 + data.len() / BYTES_PER_LINE * 3);
    for chunk in data.chunks(BYTES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|byte| format!("0x{byte:02x}")).collect();
        map.push_str("  ");
        map.push_str(&line.join(", "));
        map.push_str(",\n");
    }

    format!(
        r#"// This file was generated from {blob_name}
#include "ui.h"

#ifndef LV_ATTRIBUTE_MEM_ALIGN
#define LV_ATTRIBUTE_MEM_ALIGN
#endif

#ifndef LV_ATTRIBUTE_IMG_{var_upper}
#define LV_ATTRIBUTE_IMG_{var_upper}
#endif

const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_{var_upper} uint8_t {var_name}_map[] = {{
{map}}};

const lv_img_dsc_t {var_name} = {{
  .header = {{
    .always_zero = 0,
    .reserved = 0,
    .cf = LV_IMG_CF_TRUE_COLOR,
    .w = {width},
    .h = {height},
  }},
  .data_size = sizeof({var_name}_map),
  .data = {var_name}_map,
}};
"#
    )
}

/// Reads the blob at `blob_path` and writes the rendered descriptor source to
/// `out_path`, overwriting it. Fails before writing anything when the blob is
/// absent. Returns the blob byte count. The blob length is not checked against
/// `width * height`; the caller owns that invariant.
pub fn write_image_dsc(
    blob_path: &Path,
    out_path: &Path,
    var_name: &str,
    width: u32,
    height: u32,
) -> anyhow::Result<usize> {
    if !blob_path.is_file() {
        bail!("Missing {}", blob_path.display());
    }

    let data = fs::read(blob_path)
        .with_context(|| format!("Impossible to read blob {}", blob_path.display()))?;
    debug!("Read {} bytes from {}", data.len(), blob_path.display());

    let blob_name = blob_path.display().to_string();
    let source = render_image_dsc(&data, &blob_name, var_name, width, height);

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Impossible to create {}", parent.display()))?;
        }
    }
    fs::write(out_path, source)
        .with_context(|| format!("Impossible to write {}", out_path.display()))?;

    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    fn three_byte_blob() {
        let rendered = render_image_dsc(&[0x01, 0x02, 0x03], "Default.bin", "ui_img_default_png", 480, 480);

        assert_eq!(
            r#"// This file was generated from Default.bin
#include "ui.h"

#ifndef LV_ATTRIBUTE_MEM_ALIGN
#define LV_ATTRIBUTE_MEM_ALIGN
#endif

#ifndef LV_ATTRIBUTE_IMG_UI_IMG_DEFAULT_PNG
#define LV_ATTRIBUTE_IMG_UI_IMG_DEFAULT_PNG
#endif

const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_UI_IMG_DEFAULT_PNG uint8_t ui_img_default_png_map[] = {
  0x01, 0x02, 0x03,
};

const lv_img_dsc_t ui_img_default_png = {
  .header = {
    .always_zero = 0,
    .reserved = 0,
    .cf = LV_IMG_CF_TRUE_COLOR,
    .w = 480,
    .h = 480,
  },
  .data_size = sizeof(ui_img_default_png_map),
  .data = ui_img_default_png_map,
};
"#,
            rendered
        );
    }

    fn map_lines(rendered: &str) -> Vec<&str> {
        rendered
            .lines()
            .filter(|line| line.starts_with("  0x"))
            .collect()
    }

    #[rstest]
    fn full_line_blob_has_no_short_tail() {
        let data: Vec<u8> = (0..32).collect();

        let rendered = render_image_dsc(&data, "Default.bin", "ui_img_default_png", 480, 480);

        let lines = map_lines(&rendered);
        assert_eq!(2, lines.len());
        assert!(lines.iter().all(|line| line.matches("0x").count() == 16));
    }

    #[rstest]
    fn partial_line_blob_has_one_short_tail() {
        let data: Vec<u8> = (0..17).collect();

        let rendered = render_image_dsc(&data, "Default.bin", "ui_img_default_png", 480, 480);

        let lines = map_lines(&rendered);
        assert_eq!(2, lines.len());
        assert_eq!(16, lines[0].matches("0x").count());
        assert_eq!("  0x10,", lines[1]);
    }

    #[rstest]
    fn variable_name_is_interpolated_uppercased() {
        let rendered = render_image_dsc(&[0xff], "logo.bin", "my_logo", 32, 32);

        assert!(rendered.contains("#ifndef LV_ATTRIBUTE_IMG_MY_LOGO"));
        assert!(rendered.contains("uint8_t my_logo_map[] = {"));
        assert!(rendered.contains("const lv_img_dsc_t my_logo = {"));
        assert!(rendered.contains(".data_size = sizeof(my_logo_map),"));
        assert!(rendered.contains(".w = 32,"));
    }

    #[rstest]
    fn writes_descriptor_source() {
        let dir = tempdir().unwrap();
        let blob = dir.path().join("Default.bin");
        let output = dir.path().join("src").join("ui_img_default_png.c");
        std::fs::write(&blob, [0x01, 0x02, 0x03]).unwrap();

        let size = write_image_dsc(&blob, &output, "ui_img_default_png", 480, 480).unwrap();

        assert_eq!(3, size);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("  0x01, 0x02, 0x03,\n"));
        assert!(written.contains(".data_size = sizeof(ui_img_default_png_map),"));
    }

    #[rstest]
    fn missing_blob() {
        let dir = tempdir().unwrap();
        let blob = dir.path().join("Default.bin");
        let output = dir.path().join("ui_img_default_png.c");

        let result = write_image_dsc(&blob, &output, "ui_img_default_png", 480, 480);

        assert!(result.is_err());
        assert_eq!(
            format!("Missing {}", blob.display()),
            result.err().unwrap().to_string()
        );
        assert!(!output.exists());
    }
}
