use std::fs;
use std::io;
use std::path::Path;

const FRAME_STYLE: &str = "width: 99%; height: 99%; overflow: auto; border: 0px;";

/// HTML wrapper framing `<prefix>/<test>.html`, the runner's own result page.
pub fn result_page(prefix: &str, test: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!(
        "<html><head><title>FitNesse Report</title></head><body>\
         <iframe src=\"{}/{}.html\" style=\"{}\"></iframe></body></html>",
        prefix, test, FRAME_STYLE
    )
}

/// Copies the tree under `from` into `to`, returning the number of files copied.
pub fn copy_result_pages(from: &Path, to: &Path) -> io::Result<usize> {
    fs::create_dir_all(to)?;
    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_result_pages(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
