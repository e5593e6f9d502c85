mod workflow_test;
