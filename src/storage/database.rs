use std::path::Path;

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use tracing::{debug, info};

use crate::hashing::{generate_salt, hash_password, verify_password};

use super::error::{StorageError, StorageResult};
use super::schema::create_schema;
use super::{ClassSubject, ResultRecord, ResultRecorder, ResultRow, Teacher, TeacherResultRow};

/// SQLite store for teachers, their classes and graded results.
///
/// Opened once at startup and passed explicitly to whatever needs it.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        create_schema(&conn)?;

        info!(path = %path.display(), "Results database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests and the stub server.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        create_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub(crate) fn conn_for_tests(&self) -> parking_lot::MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Returns `true` if the connection answers a trivial query.
    pub fn ping(&self) -> bool {
        self.conn
            .lock()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }

    /// Creates a teacher account. A taken email is [`StorageError::DuplicateEmail`].
    pub fn register_teacher(&self, name: &str, email: &str, password: &str) -> StorageResult<Teacher> {
        let name = name.trim();
        let email = email.trim();
        require_non_empty("name", name)?;
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;

        let salt = generate_salt();
        let hash = hash_password(password, &salt).to_hex();

        let conn = self.conn.lock();
        let inserted = conn.execute(
            "INSERT INTO teachers (name, email, password_hash, password_salt) VALUES (?1, ?2, ?3, ?4)",
            params![name, email, hash.as_str(), salt],
        );

        match inserted {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                info!(teacher_id = id, "Teacher registered");
                Ok(Teacher {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                })
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StorageError::DuplicateEmail {
                    email: email.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Looks up a teacher by email and verifies the password.
    pub fn authenticate(&self, email: &str, password: &str) -> StorageResult<Option<Teacher>> {
        let email = email.trim();
        let row = self
            .conn
            .lock()
            .query_row(
                "SELECT id, name, email, password_hash, password_salt FROM teachers WHERE email = ?1",
                params![email],
                |row| {
                    Ok((
                        Teacher {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                        },
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        Ok(row.and_then(|(teacher, hash, salt)| {
            if verify_password(password, &salt, &hash) {
                Some(teacher)
            } else {
                debug!(teacher_id = teacher.id, "Password mismatch");
                None
            }
        }))
    }

    pub fn teacher(&self, id: i64) -> StorageResult<Option<Teacher>> {
        Ok(self
            .conn
            .lock()
            .query_row(
                "SELECT id, name, email FROM teachers WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Teacher {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    /// Adds a class/subject to a teacher's profile. Re-adding an existing pair is a no-op.
    pub fn add_class_subject(
        &self,
        teacher_id: i64,
        class_name: &str,
        subject_name: &str,
    ) -> StorageResult<ClassSubject> {
        let class_name = class_name.trim();
        let subject_name = subject_name.trim();
        require_non_empty("class_name", class_name)?;
        require_non_empty("subject_name", subject_name)?;

        if self.teacher(teacher_id)?.is_none() {
            return Err(StorageError::TeacherNotFound { id: teacher_id });
        }

        self.conn.lock().execute(
            "INSERT OR IGNORE INTO classes_subjects (teacher_id, class_name, subject_name) VALUES (?1, ?2, ?3)",
            params![teacher_id, class_name, subject_name],
        )?;

        Ok(ClassSubject {
            class_name: class_name.to_string(),
            subject_name: subject_name.to_string(),
        })
    }

    /// Class/subject pairs of a teacher, in the order they were added.
    pub fn classes_subjects(&self, teacher_id: i64) -> StorageResult<Vec<ClassSubject>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT class_name, subject_name FROM classes_subjects WHERE teacher_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![teacher_id], |row| {
            Ok(ClassSubject {
                class_name: row.get(0)?,
                subject_name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Results a teacher recorded for one class and subject, oldest first.
    pub fn results_for(
        &self,
        teacher_id: i64,
        class_name: &str,
        subject_name: &str,
    ) -> StorageResult<Vec<ResultRow>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT student_name, total_marks, max_marks, graded_at FROM results
             WHERE teacher_id = ?1 AND class_name = ?2 AND subject_name = ?3
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![teacher_id, class_name, subject_name], |row| {
            Ok(ResultRow {
                student_name: row.get(0)?,
                total_marks: row.get(1)?,
                max_marks: row.get(2)?,
                graded_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every stored result joined with its teacher's name.
    pub fn all_results(&self) -> StorageResult<Vec<TeacherResultRow>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT t.name, r.class_name, r.subject_name, r.student_name, r.total_marks, r.max_marks
             FROM results r JOIN teachers t ON r.teacher_id = t.id
             ORDER BY r.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TeacherResultRow {
                teacher_name: row.get(0)?,
                class_name: row.get(1)?,
                subject_name: row.get(2)?,
                student_name: row.get(3)?,
                total_marks: row.get(4)?,
                max_marks: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl ResultRecorder for Database {
    fn record(&self, record: &ResultRecord) -> StorageResult<()> {
        self.conn.lock().execute(
            "INSERT INTO results (teacher_id, class_name, subject_name, student_name, total_marks, max_marks, graded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.teacher_id,
                record.class_name,
                record.subject_name,
                record.student_name,
                record.total_marks,
                record.max_marks,
                Utc::now().to_rfc3339(),
            ],
        )?;

        debug!(
            teacher_id = record.teacher_id,
            student = %record.student_name,
            total_marks = record.total_marks,
            max_marks = record.max_marks,
            "Result recorded"
        );
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> StorageResult<()> {
    if value.is_empty() {
        return Err(StorageError::InvalidInput {
            reason: format!("{field} must not be empty"),
        });
    }
    Ok(())
}
