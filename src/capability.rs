use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Result of looking up an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available(PathBuf),
    Missing,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }
}

/// Look `program` up the way a shell would: paths containing a separator are
/// checked as given, bare names are searched for in `PATH`.
pub fn probe(program: &str) -> Availability {
    probe_in(program, std::env::var_os("PATH").as_deref())
}

pub fn probe_in(program: &str, path_var: Option<&OsStr>) -> Availability {
    let as_path = Path::new(program);
    if as_path.components().count() > 1 {
        return if is_executable(as_path) {
            Availability::Available(as_path.to_path_buf())
        } else {
            Availability::Missing
        };
    }

    let Some(path_var) = path_var else {
        return Availability::Missing;
    };
    for dir in std::env::split_paths(path_var) {
        for name in candidate_names(program) {
            let candidate = dir.join(&name);
            if is_executable(&candidate) {
                return Availability::Available(candidate);
            }
        }
    }
    Availability::Missing
}

fn candidate_names(program: &str) -> Vec<String> {
    if cfg!(windows) && Path::new(program).extension().is_none() {
        vec![format!("{program}.exe"), program.to_string()]
    } else {
        vec![program.to_string()]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn make_tool(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn finds_executable_on_path() {
        let dir = tempdir().unwrap();
        let tool = make_tool(dir.path(), "sendit", 0o755);
        let found = probe_in("sendit", Some(dir.path().as_os_str()));
        assert_eq!(found, Availability::Available(tool));
    }

    #[test]
    fn ignores_non_executable_files() {
        let dir = tempdir().unwrap();
        make_tool(dir.path(), "sendit", 0o644);
        assert_eq!(probe_in("sendit", Some(dir.path().as_os_str())), Availability::Missing);
    }

    #[test]
    fn explicit_paths_skip_the_search() {
        let dir = tempdir().unwrap();
        let tool = make_tool(dir.path(), "sendit", 0o755);
        let found = probe_in(tool.to_str().unwrap(), None);
        assert!(found.is_available());
        assert_eq!(
            probe_in(dir.path().join("nope").to_str().unwrap(), None),
            Availability::Missing
        );
    }

    #[test]
    fn missing_path_variable() {
        assert_eq!(probe_in("sendit", None), Availability::Missing);
    }
}
