pub(super) const TITLE: &str = "Proposed Predictive Maintenance Pipeline";

pub(super) const STAGES: [(&str, (f64, f64, f64)); 8] = [
    ("Data Acquisition\n(Sensor Data Collection)", (0.8, 0.93, 1.0)),
    ("Dataset Preparation\n(Data Validation & Splitting)", (0.8, 1.0, 0.8)),
    ("Data Processing\n(Standardization & Cleaning)", (1.0, 0.95, 0.8)),
    ("Class Balancing\n(SMOTE Oversampling)", (1.0, 0.85, 0.85)),
    ("Model Training\n(Random Forest & Naive Bayes)", (0.85, 1.0, 1.0)),
    ("Hyperparameter Optimization\n(GridSearchCV for RF)", (0.93, 0.85, 1.0)),
    ("Model Evaluation\n(Accuracy, Precision, Recall, F1, ROC-AUC)", (1.0, 0.9, 0.7)),
    ("Final ClassificationDecision\n(Maintenance Needed or Not)", (0.95, 1.0, 0.85)),
];
