use super::*;
use std::io::Read;
use tempfile::TempDir;

#[test]
fn test_memory_stat_and_read() {
    let fs = MemoryFileSystem::new();
    fs.insert_file("dir/file.bin", b"hello world".to_vec());

    let stat = fs.stat(Path::new("dir/file.bin")).unwrap();
    assert_eq!(stat, FileStat { len: 11, is_dir: false });
    assert!(fs.stat(Path::new("dir")).unwrap().is_dir);

    let mut file = fs.open(Path::new("./dir//file.bin")).unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "hello world");
}

#[test]
fn test_memory_read_at_does_not_move_position() {
    let fs = MemoryFileSystem::new();
    fs.insert_file("file.bin", b"0123456789".to_vec());

    let mut file = fs.open(Path::new("file.bin")).unwrap();
    let mut buf = [0u8; 3];
    assert_eq!(file.read_at(&mut buf, 5).unwrap(), 3);
    assert_eq!(&buf, b"567");

    let mut head = [0u8; 2];
    file.read_exact(&mut head).unwrap();
    assert_eq!(&head, b"01");

    assert_eq!(file.read_at(&mut buf, 10).unwrap(), 0);
    assert_eq!(file.read_at(&mut buf, 8).unwrap(), 2);
}

#[test]
fn test_memory_missing_file() {
    let fs = MemoryFileSystem::new();
    let err = fs.stat(Path::new("missing")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(fs.open(Path::new("missing")).is_err());
}

#[test]
fn test_memory_open_is_a_snapshot() {
    let fs = MemoryFileSystem::new();
    fs.insert_file("file.bin", vec![1u8; 4]);

    let file = fs.open(Path::new("file.bin")).unwrap();
    fs.append("file.bin", &[2u8; 4]);

    assert_eq!(file.stat().unwrap().len, 4);
    assert_eq!(fs.stat(Path::new("file.bin")).unwrap().len, 8);
}

#[test]
fn test_memory_dir_names() {
    let fs = MemoryFileSystem::new();
    fs.insert_file("root/b.txt", b"b".to_vec());
    fs.insert_file("root/a.txt", b"a".to_vec());
    fs.insert_file("root/sub/c.txt", b"c".to_vec());

    let mut dir = fs.open(Path::new("root")).unwrap();
    assert!(dir.stat().unwrap().is_dir);
    assert_eq!(dir.read_dir_names(Some(2)).unwrap(), vec!["a.txt", "b.txt"]);
    assert_eq!(dir.read_dir_names(None).unwrap(), vec!["sub"]);
    assert!(dir.read_dir_names(None).unwrap().is_empty());

    let mut file = fs.open(Path::new("root/a.txt")).unwrap();
    assert!(file.read_dir_names(None).is_err());
}

#[test]
fn test_memory_empty_dir() {
    let fs = MemoryFileSystem::new();
    fs.create_dir("./empty//");

    assert_eq!(fs.stat(Path::new("empty")).unwrap(), FileStat { len: 0, is_dir: true });
    let mut dir = fs.open(Path::new("empty")).unwrap();
    assert!(dir.read_dir_names(None).unwrap().is_empty());
    assert!(fs.remove("empty"));
    assert!(fs.stat(Path::new("empty")).is_err());
}

#[test]
fn test_memory_remove() {
    let fs = MemoryFileSystem::new();
    fs.insert_file("file.bin", b"x".to_vec());
    assert!(fs.remove("file.bin"));
    assert!(!fs.remove("file.bin"));
    assert!(fs.contents("file.bin").is_none());
}

#[test]
fn test_read_exact_at_short_file() {
    let fs = MemoryFileSystem::new();
    fs.insert_file("file.bin", b"abc".to_vec());
    let file = fs.open(Path::new("file.bin")).unwrap();

    let mut buf = [0u8; 2];
    read_exact_at(&file, &mut buf, 1).unwrap();
    assert_eq!(&buf, b"bc");

    let err = read_exact_at(&file, &mut buf, 2).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[test]
fn test_os_file_system() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.bin");
    std::fs::write(&path, b"on-disk contents").unwrap();
    std::fs::write(temp.path().join("other.bin"), b"x").unwrap();

    let fs = OsFileSystem::new();
    let stat = fs.stat(&path).unwrap();
    assert_eq!(stat.len, 16);
    assert!(!stat.is_dir);
    assert!(fs.stat(temp.path()).unwrap().is_dir);

    let file = fs.open(&path).unwrap();
    let mut buf = [0u8; 8];
    read_exact_at(&file, &mut buf, 3).unwrap();
    assert_eq!(&buf, b"disk con");

    let mut dir = fs.open(temp.path()).unwrap();
    let mut names = dir.read_dir_names(None).unwrap();
    names.sort();
    assert_eq!(names, vec!["data.bin", "other.bin"]);
}

#[test]
fn test_file_system_by_reference() {
    fn stat_len<F: FileSystem>(fs: F, path: &str) -> u64 {
        fs.stat(Path::new(path)).unwrap().len
    }

    let fs = MemoryFileSystem::new();
    fs.insert_file("file.bin", vec![0u8; 7]);
    assert_eq!(stat_len(&fs, "file.bin"), 7);
}
