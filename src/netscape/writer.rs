use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::bookmark::Bookmark;
use crate::error::MergeError;

const DOCTYPE: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>";
const PREAMBLE: &str = r#"<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">"#;

/// Serialize bookmarks as a flat Netscape bookmark document.
pub fn write_netscape<W: Write>(out: &mut W, bookmarks: &[Bookmark], title: &str) -> io::Result<()> {
    let title = escape_text(title);

    writeln!(out, "{}", DOCTYPE)?;
    writeln!(out, "{}", PREAMBLE)?;
    writeln!(out, "<TITLE>{}</TITLE>", title)?;
    writeln!(out, "<H1>{}</H1>", title)?;
    writeln!(out, "<DL><p>")?;

    for bookmark in bookmarks {
        write!(out, "    <DT><A HREF=\"{}\"", escape_attr(&bookmark.url))?;
        if let Some(add_date) = bookmark.add_date {
            write!(out, " ADD_DATE=\"{}\"", add_date)?;
        }
        if let Some(icon) = &bookmark.icon {
            write!(out, " ICON=\"{}\"", escape_attr(icon))?;
        }
        writeln!(out, ">{}</A>", escape_text(&bookmark.title))?;
    }

    writeln!(out, "</DL><p>")?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn render_netscape(bookmarks: &[Bookmark], title: &str) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_netscape(&mut buf, bookmarks, title);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the document into a uniquely named temp file in the target
/// directory, then rename it into place so a failed write never leaves a
/// truncated file behind. The temp file is removed when dropped unpersisted.
pub fn write_file(path: &Path, bookmarks: &[Bookmark], title: &str) -> Result<(), MergeError> {
    let to_write_error = |source| MergeError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(to_write_error)?;
    {
        let mut out = io::BufWriter::new(tmp.as_file_mut());
        write_netscape(&mut out, bookmarks, title)
            .and_then(|_| out.flush())
            .map_err(to_write_error)?;
    }
    tmp.as_file().sync_all().map_err(to_write_error)?;
    tmp.persist(path).map_err(|e| to_write_error(e.error))?;

    debug!("Wrote {} bookmarks to {:?}", bookmarks.len(), path);
    Ok(())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
