#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// A small Goodreads export. Only the 2025 `read`/`currently-reading` rows
/// count: 4 books, 100..=412 pages, months 2025-01 (812 p) and 2025-02 (100 p).
pub const EXPORT_CSV: &str = "\
Book Id,Title,Author,Author l-f,My Rating,Average Rating,Number of Pages,Date Read,Date Added,Bookshelves,Exclusive Shelf
1,Dune,Frank Herbert,\"Herbert, Frank\",5,4.27,412,2025/01/20,2025/01/14,,read
2,Emma,Jane Austen,\"Austen, Jane\",3,4.03,100,,2025/01/03,,read
3,Kindred,Octavia E. Butler,\"Butler, Octavia E.\",5,4.29,300,,2025/01/22,,currently-reading
4,Ubik,Philip K. Dick,\"Dick, Philip K.\",0,4.08,100,,2025/02/02,,read
5,Piranesi,Susanna Clarke,\"Clarke, Susanna\",4,4.24,272,,2024/12/30,,read
6,Middlemarch,George Eliot,\"Eliot, George\",0,4.01,880,,2025/03/01,,to-read
7,Beloved,Toni Morrison,\"Morrison, Toni\",,3.91,,,2025/03/05,,read
";

pub struct Library {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn write_library() -> Library {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("goodreads_library_export.csv");
    std::fs::write(&path, EXPORT_CSV).expect("write library csv");
    Library { _dir: dir, path }
}
