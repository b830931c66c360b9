/*!

This is the long-form manual for `course_survey` and `surveyx`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, as downloaded from Google Forms
* `xlsx` Excel workbooks, as downloaded from Google Forms or Microsoft Forms

If no input type is given, it is guessed from the extension of the input file.

In both cases the first row holds the questions of the survey and every other
row is one response. The following columns are mandatory:

| column                                    | content                          |
|-------------------------------------------|----------------------------------|
| `First Name`                              | first name of the student        |
| `Last Name`                               | last name of the student         |
| `Email Address`                           | email of the student             |
| `Advisor (last name of academic advisor)` | advisor of the student           |

Every other column whose question contains a `[...]` segment is a course. The
cells below it are the rank given by the student to that course (`1` for the
first choice, `2` for the second, and so on). Blank or non-numeric cells mean
that the student did not rank the course. Columns without brackets
(free-response questions, timestamps) are ignored.

### Course headers

Google Forms writes grid questions as `Question [Row label]`. The row label
must follow this layout:

```text
TYPE CATALOG_CODE NAME (N credits) [EXTERNAL_CODE [SECTION]] TEACHERS
```

For example:

```text
Rank the art electives [ART 101 Painting (3 credits) ABC12D Jones]
Rank the science electives [SCI 150 Chemistry (4 credits) SCS22H L Okafor and Brandt]
Rank the music electives [MUS 110A Choir (1 credit) Smith]
```

- `TYPE` is a code in capital letters. Preferences are grouped by type, and every
  type becomes one `CourseN` column of the output.
- `EXTERNAL_CODE` is optional and must be three capital letters, two digits and
  one capital letter. A single capital letter right after it is a section letter
  and is appended to the code (`SCS22HL` above). Anything else after the credits is
  read as the teachers. When nothing follows the code, its last token stands for the
  teachers.
- Asterisks (`*`) are removed and line breaks are read as spaces.

Tutorials use a shorter layout: any row label containing `tutorial` (in any case)
is a tutorial, whose type is the text after `in `:

```text
Tutorials [Writing Tutorial in WRIT]
```

A header that contains brackets but does not follow these layouts stops the
program with an error that quotes the header.

## Output

The output workbook has one worksheet, `PageStyle_Sheet1`, with the columns:

```text
SchoolDbn, SchoolYear, TermId, StudentId, LastName, FirstName, OffClass, Gender, Course1 .. Course15
```

Each course column holds the external code of the first choice of the student for
one course type (`tutorial` or `other` if that course has no external code). A
note attached to the cell lists all the ranked choices for that type:

```text
ART:
  1st Choices:
    - "Painting" (ABC12D)

  2nd Choices:
    - "Sculpture" (None)

```

## Configuration

`surveyx` reads a JSON configuration file (`config.json` by default):

```json
{
  "School ID": "00X000",
  "School Year": "2024",
  "Term ID": "1",
  "Input File": "input.csv",
  "Output File": "output.xlsx",
  "Column Layout": "aligned"
}
```

If the file does not exist, it is created with placeholder values and the
program stops: edit it and run the program again.

`Column Layout` is optional:
- `aligned` (default): every course type of the survey has its own column, in
  alphabetical order of the types. A student without a first choice for a type
  gets a blank cell.
- `compact`: types without a first choice are skipped and the following types move
  one column to the left. Columns of different students may then hold different
  types. This is the layout of the first versions of the tool.

 */
