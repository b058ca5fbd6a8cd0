/*!

This is the long-form manual for `survey_analysis` and `survey-stats`.

## Input tables

The survey was run three times: in English, in Spanish, and in English for the
Apache community. Each run is exported as one table (CSV or Excel), one row per
respondent, with the question texts as headers. Headers are matched verbatim:
the Spanish export keeps a leading space in front of every question.

An empty cell is a missing answer. Missing answers are never an error: they are
skipped by the distributions and hold no role for the role counts.

## Columns

| Canonical column     | Content                                                   |
|----------------------|-----------------------------------------------------------|
| `Roles`              | roles joined by `;`, e.g. `Developer;Tester`              |
| `DeflationFrequency` | `Frequently`, `Occasionally` or `Never`                   |
| `InflationFrequency` | `Frequently`, `Occasionally` or `Never`                   |
| `Impact`             | `It has no impact`, `Its impact is minimum`, `It has a significant impact` |
| `RemediesText`       | free text, optional                                       |

The headers of each source are described by a [crate::SourceLayout]. The default
layouts contain the question texts of the questionnaires.

## Translation

Spanish answers are translated with fixed dictionaries. Every piece of a role set
must be in the role dictionary, and every frequency or impact answer in its
dictionary: any other value stops the analysis with
[crate::AnalysisError::UntranslatableValue]. Some Spanish roles (`Líder técnico`,
`DBA`, ...) translate to roles outside of the five canonical ones and are then
counted as `Other`.

English answers are only checked: the frequencies and impacts must already be
canonical values. English roles are kept as written.

Translating a table twice is an error, since canonical values are not Spanish.

## Aggregates

- roles: for each of `Developer`, `Tester`, `Project Manager`, `Architect` and
  `Business Analyst`, the number of respondents listing it exactly. A respondent
  listing several roles is counted for each of them. `Other` counts the
  respondents listing at least one role outside of these five.
- distributions: for deflation, inflation and impact, the count and proportion
  of each answer among the answered cells.
- comparison: deflation and inflation counts side by side for `Never`,
  `Occasionally` and `Frequently`.

## Configuration file

The `survey-stats` program reads a JSON configuration:

```json
{
  "surveyDirectory": "responses",
  "fileSources": [
    { "label": "Apache", "filePath": "apache.csv", "language": "english" },
    { "label": "English", "filePath": "english.xlsx", "language": "english",
      "excelWorksheetName": "Form Responses 1" },
    { "label": "Spanish", "filePath": "spanish.csv", "language": "spanish",
      "columns": { "remediesText": " ¿Qué propones?" } }
  ],
  "outputSettings": { "outputDirectory": "charts", "generateCharts": true,
                      "plotWidth": 1200, "plotHeight": 800 }
}
```

Paths are relative to the configuration file. The provider (`csv` or `excel`) is
inferred from the file extension unless `provider` is given.

*/
