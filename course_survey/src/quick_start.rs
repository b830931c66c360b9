/*!

# Quick start with Google Forms

This example collects course preferences for two art electives and a math
elective, then builds the programming spreadsheet.

**Creating the survey** Create a new Form with four short-answer questions:
`First Name`, `Last Name`, `Email Address` and
`Advisor (last name of academic advisor)`. Then add a **Multiple Choice Grid**
question named `Rank the electives`. The rows are the courses, the columns are the
ranks (`1`, `2`, `3`):

```text
ART 101 Painting (3 credits) ABC12D Jones
ART 102 Sculpture (3 credits) Ruiz
MATH 201 Linear Algebra (4 credits) MLA21X Noether
```

See the [manual](../manual/index.html#course-headers) for the layout of the rows.

**Getting the results** In the `Responses` tab, download the responses in CSV
format. Every course becomes a column such as
`Rank the electives [ART 101 Painting (3 credits) ABC12D Jones]`.

**Running** The first run creates the configuration file and stops:

```bash
surveyx
```

Fill in the school identifiers in `config.json`, then run:

```bash
surveyx -i 'Course Survey (Responses).csv' -o programming.xlsx
```

After running this command, you should see a summary of the run:

```text
[2024-05-02T09:55:59Z INFO  course_survey] CourseCatalog::build: 3 courses, types: {"ART", "MATH"}
[2024-05-02T09:55:59Z INFO  course_survey] build_students: processing 42 responses over 3 courses
[2024-05-02T09:55:59Z INFO  surveyx::survey] write_workbook: 42 students written to "programming.xlsx"
```

**Checking the choices** The text of the choices can be written as JSON with
`--summary` and compared with a previous run with `--reference`:

```bash
surveyx -i responses.csv --summary stdout --reference last_week.json
```

*/
