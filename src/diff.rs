//! Character alignment for `text_diff` explanations.
//!
//! Levenshtein DP with a backtrace that prefers matches, then substitutions,
//! then gaps. Play mode renders the result as three terminal rows.

/// One aligned column: `(submitted, correct)`, `None` is a gap.
pub type Column = (Option<char>, Option<char>);

pub fn align(submitted: &str, correct: &str) -> Vec<Column> {
  let a: Vec<char> = submitted.chars().collect();
  let b: Vec<char> = correct.chars().collect();
  let (n, m) = (a.len(), b.len());

  let mut dp = vec![vec![0usize; m + 1]; n + 1];
  for (i, row) in dp.iter_mut().enumerate() { row[0] = i; }
  for j in 0..=m { dp[0][j] = j; }
  for i in 1..=n {
    for j in 1..=m {
      dp[i][j] = if a[i - 1] == b[j - 1] {
        dp[i - 1][j - 1]
      } else {
        1 + dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1])
      };
    }
  }

  let (mut i, mut j) = (n, m);
  let mut cols = Vec::with_capacity(n.max(m));
  while i > 0 || j > 0 {
    if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
      cols.push((Some(a[i - 1]), Some(b[j - 1])));
      i -= 1;
      j -= 1;
    } else if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + 1 {
      cols.push((Some(a[i - 1]), Some(b[j - 1])));
      i -= 1;
      j -= 1;
    } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
      cols.push((Some(a[i - 1]), None));
      i -= 1;
    } else {
      cols.push((None, Some(b[j - 1])));
      j -= 1;
    }
  }
  cols.reverse();
  cols
}

/// Edit distance implied by an alignment.
pub fn distance(cols: &[Column]) -> usize {
  cols.iter().filter(|(a, b)| a != b).count()
}

/// Three rows: submitted (`-` for gaps), correct (`_` for gaps), and `^` under each difference.
pub fn render(submitted: &str, correct: &str) -> String {
  let cols = align(submitted, correct);
  let mut top = String::new();
  let mut bottom = String::new();
  let mut marks = String::new();
  for (a, b) in &cols {
    top.push(a.unwrap_or('-'));
    bottom.push(b.unwrap_or('_'));
    marks.push(if a == b { ' ' } else { '^' });
  }
  format!("{}\n{}\n{}", top, bottom, marks.trim_end())
}
