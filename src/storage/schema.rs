use rusqlite::Connection;

/// Creates the teachers, classes_subjects and results tables if missing.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS classes_subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id INTEGER NOT NULL REFERENCES teachers (id),
            class_name TEXT NOT NULL,
            subject_name TEXT NOT NULL,
            UNIQUE (teacher_id, class_name, subject_name)
        );

        CREATE TABLE IF NOT EXISTS results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id INTEGER NOT NULL REFERENCES teachers (id),
            class_name TEXT NOT NULL,
            subject_name TEXT NOT NULL,
            student_name TEXT NOT NULL,
            total_marks REAL NOT NULL,
            max_marks REAL NOT NULL,
            graded_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_results_teacher_class_subject
            ON results (teacher_id, class_name, subject_name);
        "#,
    )
}
