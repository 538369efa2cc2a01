//! One function per action. Each returns the notice to show on success and
//! leaves listing refresh to the dispatcher.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::command::{Action, ParsedCommand};
use crate::error::{CommandError, CommandResult};
use crate::notice::Notice;
use crate::session::Session;

/// How many lines `head` and `tail` show.
pub const PREVIEW_LINES: usize = 10;

fn required<'a>(
    command: &'a ParsedCommand,
    action: Action,
    position: usize,
) -> CommandResult<&'a str> {
    command
        .arg(position)
        .ok_or(CommandError::MissingArgument { action, position })
}

pub fn pwd(session: &mut Session, _command: &ParsedCommand) -> CommandResult<Notice> {
    let cwd = env::current_dir()?.display().to_string();
    session.set_output([cwd.clone()]);
    Ok(Notice::info(cwd))
}

pub fn cd(session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let path = required(command, Action::Cd, 1)?;
    let cwd = session.change_dir(Path::new(path))?;
    Ok(Notice::success(format!("Directory changed to {}.", cwd.display())))
}

pub fn mv(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let src = required(command, Action::Mv, 1)?;
    let dest = required(command, Action::Mv, 2)?;
    move_path(Path::new(src), Path::new(dest))?;
    Ok(Notice::success(format!("Moved {src} to {dest}.")))
}

pub fn cp(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let src = required(command, Action::Cp, 1)?;
    let dest = required(command, Action::Cp, 2)?;
    let src_path = Path::new(src);
    fs::copy(src_path, into_dir(src_path, Path::new(dest)))?;
    Ok(Notice::success(format!("Copied {src} to {dest}.")))
}

pub fn rm(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let path = required(command, Action::Rm, 1)?;
    fs::remove_file(path)?;
    Ok(Notice::success(format!("Deleted {path}.")))
}

pub fn touch(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let name = required(command, Action::Touch, 1)?;
    fs::File::create(name)?;
    Ok(Notice::success(format!("Created file {name}.")))
}

pub fn cat(session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let name = required(command, Action::Cat, 1)?;
    let content = fs::read_to_string(name)?;
    session.set_output(split_lines(&content, is_line_boundary));
    Ok(Notice::info(format!("Displayed {name}.")))
}

pub fn echo(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let (text, file_name) = parse_echo(command.raw())?;
    fs::write(&file_name, text)?;
    Ok(Notice::success(format!("Content written to {file_name}.")))
}

pub fn whoami(session: &mut Session, _command: &ParsedCommand) -> CommandResult<Notice> {
    let user = identity_from(Command::new("whoami").output()?)?;
    session.set_output([user]);
    Ok(Notice::success("Command executed successfully."))
}

pub fn chmod(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let mode = required(command, Action::Chmod, 1)?;
    let bits = parse_mode(mode)?;
    let path = required(command, Action::Chmod, 2)?;
    apply_mode(Path::new(path), bits)?;
    Ok(Notice::success(format!("Permissions for {path} changed to {mode}.")))
}

pub fn mkdir(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let name = required(command, Action::Mkdir, 1)?;
    fs::create_dir(name)?;
    Ok(Notice::success(format!("Directory {name} created.")))
}

pub fn rmdir(_session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let name = required(command, Action::Rmdir, 1)?;
    fs::remove_dir(name)?;
    Ok(Notice::success(format!("Directory {name} removed.")))
}

pub fn head(session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let name = required(command, Action::Head, 1)?;
    let content = fs::read_to_string(name)?;
    let lines = split_lines(&content, is_newline);
    session.set_output(lines.into_iter().take(PREVIEW_LINES).map(str::trim));
    Ok(Notice::info(format!("Displayed first lines of {name}.")))
}

pub fn tail(session: &mut Session, command: &ParsedCommand) -> CommandResult<Notice> {
    let name = required(command, Action::Tail, 1)?;
    let content = fs::read_to_string(name)?;
    let lines = split_lines(&content, is_newline);
    let start = lines.len().saturating_sub(PREVIEW_LINES);
    session.set_output(lines[start..].iter().map(|line| line.trim()));
    Ok(Notice::info(format!("Displayed last lines of {name}.")))
}

/// Trimmed stdout of a finished identity command, or its stderr on failure.
fn identity_from(output: Output) -> CommandResult<String> {
    if !output.status.success() {
        return Err(CommandError::Subprocess {
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Every character `cat` treats as ending a line.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Plain newlines only; `\r\n` and a bare `\r` both count.
fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Splits on `is_break`, folding `\r\n` into one break. A trailing break
/// does not produce an empty last line.
fn split_lines(content: &str, is_break: fn(char) -> bool) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_break(c) {
            continue;
        }
        lines.push(&content[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Splits `echo 'text' > file` into the text to write and the file name.
pub fn parse_echo(raw: &str) -> CommandResult<(String, String)> {
    let mut parts = raw.split('>');
    let left = parts.next().unwrap_or_default();
    let right = parts.next().ok_or(CommandError::MissingRedirect)?;

    let without_keyword = left.replacen("echo", "", 1);
    let text = strip_quotes(without_keyword.trim()).to_string();
    Ok((text, right.trim().to_string()))
}

/// Drops at most one leading and one trailing `'`, then the same for `"`.
/// The ends are handled independently, so an unpaired quote goes too.
fn strip_quotes(text: &str) -> &str {
    let mut text = text;
    for quote in ['\'', '"'] {
        text = text.strip_prefix(quote).unwrap_or(text);
        text = text.strip_suffix(quote).unwrap_or(text);
    }
    text
}

/// Octal mode string, with or without a `0o` prefix.
pub fn parse_mode(mode: &str) -> CommandResult<u32> {
    let digits = mode
        .strip_prefix("0o")
        .or_else(|| mode.strip_prefix("0O"))
        .unwrap_or(mode);
    u32::from_str_radix(digits, 8).map_err(|_| CommandError::InvalidMode {
        mode: mode.to_string(),
    })
}

#[cfg(unix)]
fn apply_mode(path: &Path, bits: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(bits))
}

#[cfg(not(unix))]
fn apply_mode(path: &Path, bits: u32) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(bits & 0o200 == 0);
    fs::set_permissions(path, permissions)
}

/// `dest` itself, or `dest/<name of src>` when `dest` is an existing directory.
fn into_dir(src: &Path, dest: &Path) -> PathBuf {
    match src.file_name() {
        Some(name) if dest.is_dir() => dest.join(name),
        _ => dest.to_path_buf(),
    }
}

fn move_path(src: &Path, dest: &Path) -> io::Result<()> {
    let target = into_dir(src, dest);
    if target != dest && target.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Destination path '{}' already exists", target.display()),
        ));
    }

    let rename_err = match fs::rename(src, &target) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    // Rename can't cross filesystems; fall back to copy + delete.
    let metadata = match fs::symlink_metadata(src) {
        Ok(metadata) => metadata,
        Err(_) => return Err(rename_err),
    };
    if metadata.is_dir() {
        copy_tree(src, &target)?;
        fs::remove_dir_all(src)
    } else {
        fs::copy(src, &target)?;
        fs::remove_file(src)
    }
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let to = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &to)?;
        } else {
            fs::copy(entry.path(), &to)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::{tempdir, TempDir};

    fn session_in_tempdir() -> (TempDir, Session) {
        let dir = tempdir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        let session = Session::new().unwrap();
        (dir, session)
    }

    fn parsed(line: &str) -> ParsedCommand {
        ParsedCommand::parse(line).unwrap()
    }

    fn numbered_file(path: &Path, count: usize) {
        let body: String = (1..=count).map(|n| format!("line {n}\n")).collect();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_parse_echo_double_quotes() {
        let (text, file) = parse_echo("echo \"hello\" > out.txt").unwrap();
        assert_eq!(text, "hello");
        assert_eq!(file, "out.txt");
    }

    #[test]
    fn test_parse_echo_single_quotes_and_spacing() {
        let (text, file) = parse_echo("echo   'hello world'   >   notes.md  ").unwrap();
        assert_eq!(text, "hello world");
        assert_eq!(file, "notes.md");
    }

    #[test]
    fn test_parse_echo_strips_one_layer() {
        let (text, _) = parse_echo("echo \"'quoted'\" > f").unwrap();
        assert_eq!(text, "'quoted'");
        let (text, _) = parse_echo("echo ''twice'' > f").unwrap();
        assert_eq!(text, "'twice'");
    }

    #[test]
    fn test_parse_echo_unpaired_quote() {
        let (text, _) = parse_echo("echo 'hello > f").unwrap();
        assert_eq!(text, "hello");
        let (text, _) = parse_echo("echo hello\" > f").unwrap();
        assert_eq!(text, "hello");
        let (text, _) = parse_echo("echo 'mixed\" > f").unwrap();
        assert_eq!(text, "mixed");
    }

    #[test]
    fn test_split_lines_boundaries() {
        assert_eq!(split_lines("", is_line_boundary), Vec::<&str>::new());
        assert_eq!(split_lines("a\n", is_line_boundary), ["a"]);
        assert_eq!(split_lines("a\rb\r\nc", is_line_boundary), ["a", "b", "c"]);
        assert_eq!(split_lines("a\x0bb\x0cc", is_line_boundary), ["a", "b", "c"]);
        assert_eq!(split_lines("a\x0bb", is_newline), ["a\x0bb"]);
        assert_eq!(split_lines("a\n\n", is_newline), ["a", ""]);
    }

    #[cfg(unix)]
    #[test]
    fn test_identity_failure_carries_stderr() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        let failed = Output {
            status: ExitStatus::from_raw(1 << 8),
            stdout: Vec::new(),
            stderr: b"whoami: cannot find name for user ID 4242\n".to_vec(),
        };
        match identity_from(failed) {
            Err(CommandError::Subprocess { stderr }) => {
                assert_eq!(stderr, "whoami: cannot find name for user ID 4242");
            }
            other => panic!("expected subprocess error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_identity_success_trims_stdout() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        let ok = Output {
            status: ExitStatus::from_raw(0),
            stdout: b"alice\n".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(identity_from(ok).unwrap(), "alice");
    }

    #[test]
    fn test_parse_echo_removes_keyword_once() {
        let (text, _) = parse_echo("echo echo > f").unwrap();
        assert_eq!(text, "echo");
    }

    #[test]
    fn test_parse_echo_without_redirect() {
        assert!(matches!(
            parse_echo("echo hello"),
            Err(CommandError::MissingRedirect)
        ));
    }

    #[test]
    fn test_parse_echo_stops_at_second_redirect() {
        let (_, file) = parse_echo("echo hi > a > b").unwrap();
        assert_eq!(file, "a");
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755").unwrap(), 0o755);
        assert_eq!(parse_mode("0o644").unwrap(), 0o644);
        assert_eq!(parse_mode("0600").unwrap(), 0o600);
        assert!(matches!(
            parse_mode("rwx"),
            Err(CommandError::InvalidMode { .. })
        ));
        assert!(parse_mode("8").is_err());
        assert!(parse_mode("").is_err());
    }

    #[test]
    #[serial]
    fn test_pwd_outputs_cwd() {
        let (_dir, mut session) = session_in_tempdir();
        let notice = pwd(&mut session, &parsed("pwd")).unwrap();
        let cwd = env::current_dir().unwrap().display().to_string();
        assert_eq!(session.output(), [cwd.clone()]);
        assert_eq!(notice, Notice::info(cwd));
    }

    #[test]
    #[serial]
    fn test_touch_truncates_existing() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("data.txt", "old content").unwrap();
        let notice = touch(&mut session, &parsed("touch data.txt")).unwrap();
        assert_eq!(notice.message, "Created file data.txt.");
        assert_eq!(fs::read_to_string("data.txt").unwrap(), "");
    }

    #[test]
    #[serial]
    fn test_cat_one_entry_per_line() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("poem.txt", "  roses\nviolets\r\n\nend\rfeed\x0cdone").unwrap();
        cat(&mut session, &parsed("cat poem.txt")).unwrap();
        assert_eq!(
            session.output(),
            ["  roses", "violets", "", "end", "feed", "done"]
        );
    }

    #[test]
    #[serial]
    fn test_head_and_tail_short_file() {
        let (_dir, mut session) = session_in_tempdir();
        numbered_file(Path::new("short.txt"), 3);

        head(&mut session, &parsed("head short.txt")).unwrap();
        assert_eq!(session.output(), ["line 1", "line 2", "line 3"]);
        tail(&mut session, &parsed("tail short.txt")).unwrap();
        assert_eq!(session.output(), ["line 1", "line 2", "line 3"]);
    }

    #[test]
    #[serial]
    fn test_head_and_tail_long_file() {
        let (_dir, mut session) = session_in_tempdir();
        numbered_file(Path::new("long.txt"), 25);

        head(&mut session, &parsed("head long.txt")).unwrap();
        let expected: Vec<String> = (1..=10).map(|n| format!("line {n}")).collect();
        assert_eq!(session.output(), expected.as_slice());

        tail(&mut session, &parsed("tail long.txt")).unwrap();
        let expected: Vec<String> = (16..=25).map(|n| format!("line {n}")).collect();
        assert_eq!(session.output(), expected.as_slice());
    }

    #[test]
    #[serial]
    fn test_head_trims_lines() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("padded.txt", "  a  \n\tb\n").unwrap();
        head(&mut session, &parsed("head padded.txt")).unwrap();
        assert_eq!(session.output(), ["a", "b"]);
    }

    #[test]
    #[serial]
    fn test_rm_refuses_directory() {
        let (_dir, mut session) = session_in_tempdir();
        fs::create_dir("keep").unwrap();
        let err = rm(&mut session, &parsed("rm keep")).unwrap_err();
        assert!(matches!(err, CommandError::Io(_)));
        assert!(Path::new("keep").is_dir());
    }

    #[test]
    #[serial]
    fn test_mv_renames() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("a.txt", "a").unwrap();
        let notice = mv(&mut session, &parsed("mv a.txt b.txt")).unwrap();
        assert_eq!(notice.message, "Moved a.txt to b.txt.");
        assert!(!Path::new("a.txt").exists());
        assert_eq!(fs::read_to_string("b.txt").unwrap(), "a");
    }

    #[test]
    #[serial]
    fn test_mv_into_directory() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("a.txt", "a").unwrap();
        fs::create_dir("box").unwrap();
        mv(&mut session, &parsed("mv a.txt box")).unwrap();
        assert!(Path::new("box/a.txt").is_file());
    }

    #[test]
    #[serial]
    fn test_mv_into_directory_refuses_overwrite() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("a.txt", "new").unwrap();
        fs::create_dir("box").unwrap();
        fs::write("box/a.txt", "old").unwrap();
        let err = mv(&mut session, &parsed("mv a.txt box")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string("box/a.txt").unwrap(), "old");
        assert!(Path::new("a.txt").exists());
    }

    #[test]
    #[serial]
    fn test_mv_missing_destination() {
        let (_dir, mut session) = session_in_tempdir();
        let err = mv(&mut session, &parsed("mv a.txt")).unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingArgument {
                action: Action::Mv,
                position: 2
            }
        ));
    }

    #[test]
    #[serial]
    fn test_cp_into_directory() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("a.txt", "payload").unwrap();
        fs::create_dir("backup").unwrap();
        let notice = cp(&mut session, &parsed("cp a.txt backup")).unwrap();
        assert_eq!(notice.message, "Copied a.txt to backup.");
        assert_eq!(fs::read_to_string("backup/a.txt").unwrap(), "payload");
        assert!(Path::new("a.txt").exists());
    }

    #[test]
    #[serial]
    fn test_cp_missing_source() {
        let (_dir, mut session) = session_in_tempdir();
        assert!(matches!(
            cp(&mut session, &parsed("cp nope.txt copy.txt")),
            Err(CommandError::Io(_))
        ));
    }

    #[test]
    #[serial]
    fn test_echo_writes_without_newline() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("out.txt", "previous longer content").unwrap();
        let notice = echo(&mut session, &parsed("echo \"hello\" > out.txt")).unwrap();
        assert_eq!(notice.message, "Content written to out.txt.");
        assert_eq!(fs::read_to_string("out.txt").unwrap(), "hello");
    }

    #[test]
    #[serial]
    fn test_mkdir_then_rmdir() {
        let (_dir, mut session) = session_in_tempdir();
        let created = mkdir(&mut session, &parsed("mkdir foo")).unwrap();
        assert_eq!(created.message, "Directory foo created.");
        assert!(Path::new("foo").is_dir());

        assert!(matches!(
            mkdir(&mut session, &parsed("mkdir foo")),
            Err(CommandError::Io(_))
        ));

        let removed = rmdir(&mut session, &parsed("rmdir foo")).unwrap();
        assert_eq!(removed.message, "Directory foo removed.");
        assert!(!Path::new("foo").exists());
    }

    #[test]
    #[serial]
    fn test_rmdir_non_empty() {
        let (_dir, mut session) = session_in_tempdir();
        fs::create_dir("full").unwrap();
        fs::write("full/item", "x").unwrap();
        assert!(rmdir(&mut session, &parsed("rmdir full")).is_err());
        assert!(Path::new("full/item").exists());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_chmod_sets_bits() {
        let (_dir, mut session) = session_in_tempdir();
        fs::write("script.sh", "#!/bin/sh\n").unwrap();
        let notice = chmod(&mut session, &parsed("chmod 750 script.sh")).unwrap();
        assert_eq!(notice.message, "Permissions for script.sh changed to 750.");
        let mode = fs::metadata("script.sh").unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[test]
    #[serial]
    fn test_chmod_invalid_mode_before_path() {
        let (_dir, mut session) = session_in_tempdir();
        assert!(matches!(
            chmod(&mut session, &parsed("chmod 9z")),
            Err(CommandError::InvalidMode { .. })
        ));
        assert!(matches!(
            chmod(&mut session, &parsed("chmod 644")),
            Err(CommandError::MissingArgument { position: 2, .. })
        ));
    }

    #[test]
    #[serial]
    fn test_cd_reports_new_dir() {
        let (_dir, mut session) = session_in_tempdir();
        fs::create_dir("nested").unwrap();
        let notice = cd(&mut session, &parsed("cd nested")).unwrap();
        assert!(notice.message.starts_with("Directory changed to "));
        assert!(notice.message.ends_with("nested."));
        assert_eq!(session.cwd(), env::current_dir().unwrap());
    }

    #[test]
    #[serial]
    fn test_cd_without_argument() {
        let (_dir, mut session) = session_in_tempdir();
        let before = session.cwd().to_path_buf();
        assert!(cd(&mut session, &parsed("cd")).is_err());
        assert_eq!(session.cwd(), before);
    }
}
